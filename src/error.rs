//! Error types for the `vidsheet` crate.
//!
//! [`SheetError`] is the single error type returned by every fallible
//! operation. Each variant belongs to one [`ErrorKind`], which is what the
//! command-line front end and most callers actually branch on.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// Coarse classification of a [`SheetError`].
///
/// Every kind is fatal for a run: no contact sheet is written when any
/// error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The video file or the watermark font could not be opened or located.
    ResourceUnavailable,
    /// The requested ratio, quality, skip window, or output path is invalid.
    Configuration,
    /// A scheduled timestamp could not be decoded into a frame.
    Decode,
    /// The finished contact sheet could not be encoded or written.
    Output,
}

/// The unified error type for all `vidsheet` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetError {
    /// The video file could not be opened or is not a decodable video.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to the inspector or capturer.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The container holds no video stream.
    #[error("No video stream found in {0}")]
    NoVideoStream(PathBuf),

    /// None of the candidate font files exist.
    #[error("No watermark font found (searched: {searched})")]
    FontNotFound {
        /// Comma-separated list of the paths that were tried.
        searched: String,
    },

    /// A font file exists but could not be read or parsed.
    #[error("Failed to load watermark font {path}: {reason}")]
    FontLoad {
        /// Path of the font file.
        path: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// The ratio string is not of the form `rows:cols` with numeric parts.
    #[error("{0} is an invalid ratio value, must be in the format '4:5'")]
    InvalidRatio(String),

    /// The grid has more cells than allowed, or a zero dimension.
    #[error("{rows}:{cols} is an invalid ratio value, the product must be between 1 and {max}")]
    GridTooLarge {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        cols: u32,
        /// Maximum number of cells.
        max: u32,
    },

    /// Quality outside of `1..=10`.
    #[error("{0} is an invalid quality value, must be between 1 and 10")]
    InvalidQuality(i64),

    /// Edge skipping was requested for a video too short to skip anything.
    #[error(
        "Cannot skip the first and last {edge} seconds of a {duration:.3} second video"
    )]
    DegenerateSkipWindow {
        /// Video duration in seconds.
        duration: f64,
        /// Seconds skipped at each end.
        edge: f64,
    },

    /// The video is too short to yield distinct timestamps for every cell.
    #[error("A {duration:.3} second video is too short for {cells} distinct screenshots")]
    ScheduleTooDense {
        /// Effective duration in seconds.
        duration: f64,
        /// Number of grid cells.
        cells: u32,
    },

    /// Duration was zero, negative, or not finite.
    #[error("Invalid video duration: {0}")]
    InvalidDuration(f64),

    /// The frame sequence handed to the composer does not fill the grid.
    #[error("Expected {expected} frames for the grid, got {actual}")]
    FrameCountMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Number of frames provided.
        actual: usize,
    },

    /// A frame does not have the dimensions of its grid cell.
    #[error("Frame is {actual_width}x{actual_height}, grid cells are {width}x{height}")]
    FrameSizeMismatch {
        /// Cell width.
        width: u32,
        /// Cell height.
        height: u32,
        /// Frame width.
        actual_width: u32,
        /// Frame height.
        actual_height: u32,
    },

    /// The output path has no extension or one that cannot be written.
    #[error("Unsupported output image format for {0}")]
    UnsupportedOutputFormat(PathBuf),

    /// The output file already exists and overwriting was not allowed.
    #[error("Output already exists: {0} (use --overwrite to replace)")]
    OutputExists(PathBuf),

    /// The requested frame lies past the end of the stream.
    #[error("Frame {frame_number} is out of range (video has {total_frames} frames)")]
    FrameOutOfRange {
        /// The frame number that was requested.
        frame_number: u64,
        /// The total number of frames in the video.
        total_frames: u64,
    },

    /// Decoding produced no frame for the requested position.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error while writing the contact sheet.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding the contact sheet.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl SheetError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetError::FileOpen { .. }
            | SheetError::NoVideoStream(_)
            | SheetError::FontNotFound { .. }
            | SheetError::FontLoad { .. } => ErrorKind::ResourceUnavailable,
            SheetError::InvalidRatio(_)
            | SheetError::GridTooLarge { .. }
            | SheetError::InvalidQuality(_)
            | SheetError::DegenerateSkipWindow { .. }
            | SheetError::ScheduleTooDense { .. }
            | SheetError::InvalidDuration(_)
            | SheetError::FrameCountMismatch { .. }
            | SheetError::FrameSizeMismatch { .. }
            | SheetError::UnsupportedOutputFormat(_)
            | SheetError::OutputExists(_) => ErrorKind::Configuration,
            SheetError::FrameOutOfRange { .. }
            | SheetError::VideoDecodeError(_)
            | SheetError::FfmpegError(_) => ErrorKind::Decode,
            SheetError::IoError(_) | SheetError::ImageError(_) => ErrorKind::Output,
        }
    }
}

impl From<FfmpegError> for SheetError {
    fn from(error: FfmpegError) -> Self {
        SheetError::FfmpegError(error.to_string())
    }
}
