//! Video metadata.
//!
//! [`VideoMetadata`] is produced once by [`inspect`](crate::inspect::inspect)
//! and read by every later stage of the pipeline.

/// Metadata for the video stream a contact sheet is built from.
///
/// # Example
///
/// ```no_run
/// let metadata = vidsheet::inspect("input.mp4")?;
/// println!(
///     "{}x{}, {:.3}s @ {:.2} fps",
///     metadata.width, metadata.height, metadata.duration_seconds, metadata.frames_per_second,
/// );
/// # Ok::<(), vidsheet::SheetError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Duration in seconds, `frame_count / frames_per_second` rounded to
    /// three decimal places.
    pub duration_seconds: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (average rate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames reported by (or estimated from) the container.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}
