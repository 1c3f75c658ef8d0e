//! Video inspection.
//!
//! [`inspect`] opens a video, reads the properties of its best video stream,
//! and closes the demuxer again before returning. The same stream probing is
//! reused by the capturer, which opens its own handle for every frame.

use std::path::Path;

use ffmpeg_next::{
    Rational, codec::context::Context as CodecContext, format::context::Input, media::Type,
};

use crate::{
    conversion::{rational_to_fps, round_to, stream_start_pts},
    error::SheetError,
    metadata::VideoMetadata,
};

/// Properties of the selected video stream inside an open [`Input`].
pub(crate) struct StreamDetails {
    pub(crate) index: usize,
    pub(crate) time_base: Rational,
    /// First PTS of the stream in `time_base` units (non-zero for e.g. MPEG-TS).
    pub(crate) start_pts: i64,
    pub(crate) frames_per_second: f64,
    pub(crate) frame_count: u64,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) codec: String,
}

/// Open the video at `path` as an FFmpeg input context.
pub(crate) fn open_input(path: &Path) -> Result<Input, SheetError> {
    ffmpeg_next::init().map_err(|error| SheetError::FileOpen {
        path: path.to_path_buf(),
        reason: format!("FFmpeg initialisation failed: {error}"),
    })?;

    ffmpeg_next::format::input(&path).map_err(|error| SheetError::FileOpen {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

/// Locate the best video stream and read its decoding parameters.
pub(crate) fn probe_stream(input: &Input, path: &Path) -> Result<StreamDetails, SheetError> {
    let stream = input
        .streams()
        .best(Type::Video)
        .ok_or_else(|| SheetError::NoVideoStream(path.to_path_buf()))?;

    let index = stream.index();
    let not_decodable = |reason: String| SheetError::FileOpen {
        path: path.to_path_buf(),
        reason,
    };

    let decoder = CodecContext::from_parameters(stream.parameters())
        .and_then(|context| context.decoder().video())
        .map_err(|error| {
            not_decodable(format!("Failed to create video decoder for stream {index}: {error}"))
        })?;

    let frames_per_second = rational_to_fps(stream.avg_frame_rate())
        .or_else(|| rational_to_fps(stream.rate()))
        .ok_or_else(|| not_decodable(format!("Stream {index} reports no frame rate")))?;

    // nb_frames is optional in many containers (e.g. Matroska); fall back to
    // the container duration.
    let frame_count = match stream.frames() {
        count if count > 0 => count as u64,
        _ if input.duration() > 0 => {
            let seconds = input.duration() as f64 / f64::from(ffmpeg_sys_next::AV_TIME_BASE);
            (seconds * frames_per_second) as u64
        }
        _ => 0,
    };
    if frame_count == 0 {
        return Err(not_decodable(format!("Stream {index} contains no frames")));
    }

    let codec = decoder
        .codec()
        .map(|codec| codec.name().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Ok(StreamDetails {
        index,
        time_base: stream.time_base(),
        start_pts: stream_start_pts(stream.start_time()),
        frames_per_second,
        frame_count,
        width: decoder.width(),
        height: decoder.height(),
        codec,
    })
}

/// Inspect a video file and report its duration and resolution.
///
/// The duration is derived from the frame count and frame rate
/// (`frame_count / fps`, rounded to milliseconds) rather than from the
/// container's own duration field, so it agrees with the frame indices the
/// capturer seeks to.
///
/// # Errors
///
/// Returns [`SheetError::FileOpen`] if the file cannot be opened or is not a
/// decodable video, and [`SheetError::NoVideoStream`] if it has no video.
///
/// # Example
///
/// ```no_run
/// let metadata = vidsheet::inspect("movie.mkv")?;
/// assert!(metadata.duration_seconds > 0.0);
/// # Ok::<(), vidsheet::SheetError>(())
/// ```
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<VideoMetadata, SheetError> {
    let path = path.as_ref();
    log::debug!("Inspecting video: {}", path.display());

    let input = open_input(path)?;
    let details = probe_stream(&input, path)?;
    drop(input);

    let metadata = VideoMetadata {
        duration_seconds: round_to(details.frame_count as f64 / details.frames_per_second, 3),
        width: details.width,
        height: details.height,
        frames_per_second: details.frames_per_second,
        frame_count: details.frame_count,
        codec: details.codec,
    };

    log::debug!(
        "Video {}x{} [{}], {} frames @ {:.3} fps, {:.3}s",
        metadata.width,
        metadata.height,
        metadata.codec,
        metadata.frame_count,
        metadata.frames_per_second,
        metadata.duration_seconds,
    );

    Ok(metadata)
}
