//! Frame capture.
//!
//! [`capture`] decodes the frame shown at a timestamp. Every call opens its
//! own demuxer and decoder and drops them before returning, so captures do
//! not share seek state.

use std::path::Path;

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{
    conversion::{
        frame_number_to_seek_timestamp, frame_to_rgb_buffer, pts_to_frame_number, pts_to_seconds,
        seconds_to_frame_number,
    },
    error::SheetError,
    inspect::{StreamDetails, open_input, probe_stream},
};

/// A decoded RGB frame and the timestamp it was captured at.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbImage,
    timestamp: f64,
}

impl Frame {
    /// Wrap an existing image, e.g. for composing frames that did not come
    /// from a video.
    pub fn new(image: RgbImage, timestamp: f64) -> Self {
        Self { image, timestamp }
    }

    /// The pixel data.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Capture time in seconds.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the frame, returning its pixel data.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Decode the frame shown at `timestamp` seconds into the video at `path`.
///
/// The timestamp is converted to the frame index `floor(timestamp * fps)`,
/// counted from the stream's first frame even when the container starts at
/// a non-zero time.
/// The demuxer seeks to the closest keyframe before it and decodes forward
/// until that frame (or the first frame after it, for streams with gaps) is
/// reached. The result is converted to packed RGB.
///
/// # Errors
///
/// - [`SheetError::FileOpen`] / [`SheetError::NoVideoStream`] if the video
///   cannot be opened.
/// - [`SheetError::FrameOutOfRange`] if the frame index is not below the
///   stream's frame count.
/// - [`SheetError::VideoDecodeError`] if decoding yields no frame.
///
/// # Example
///
/// ```no_run
/// let frame = vidsheet::capture("input.mp4", 12.5)?;
/// frame.image().save("frame.png")?;
/// # Ok::<(), vidsheet::SheetError>(())
/// ```
pub fn capture<P: AsRef<Path>>(path: P, timestamp: f64) -> Result<Frame, SheetError> {
    let path = path.as_ref();
    let mut input = open_input(path)?;
    let details = probe_stream(&input, path)?;

    let frame_number = seconds_to_frame_number(timestamp, details.frames_per_second);
    if frame_number >= details.frame_count {
        return Err(SheetError::FrameOutOfRange {
            frame_number,
            total_frames: details.frame_count,
        });
    }

    log::debug!(
        "Capturing frame {} at {:.3}s from {}",
        frame_number,
        timestamp,
        path.display()
    );

    let stream = input
        .stream(details.index)
        .ok_or_else(|| SheetError::NoVideoStream(path.to_path_buf()))?;
    let mut decoder = CodecContext::from_parameters(stream.parameters())?
        .decoder()
        .video()?;

    let mut scaler = ScalingContext::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        Pixel::RGB24,
        details.width,
        details.height,
        ScalingFlags::BILINEAR,
    )?;

    let start_seconds = pts_to_seconds(details.start_pts, details.time_base);
    let seek_target =
        frame_number_to_seek_timestamp(frame_number, details.frames_per_second, start_seconds);
    input.seek(seek_target, ..seek_target)?;

    let mut decoded_frame = VideoFrame::empty();
    for (stream, packet) in input.packets() {
        if stream.index() != details.index {
            continue;
        }
        decoder.send_packet(&packet)?;
        if let Some(image) =
            receive_target(&mut decoder, &mut scaler, &mut decoded_frame, &details, frame_number)?
        {
            return Ok(Frame::new(image, timestamp));
        }
    }

    decoder.send_eof()?;
    if let Some(image) =
        receive_target(&mut decoder, &mut scaler, &mut decoded_frame, &details, frame_number)?
    {
        return Ok(Frame::new(image, timestamp));
    }

    Err(SheetError::VideoDecodeError(format!(
        "Could not locate frame {frame_number} ({timestamp:.3}s) in {}",
        path.display()
    )))
}

/// Drain decoded frames until one at or past `frame_number` appears.
fn receive_target(
    decoder: &mut VideoDecoder,
    scaler: &mut ScalingContext,
    decoded_frame: &mut VideoFrame,
    details: &StreamDetails,
    frame_number: u64,
) -> Result<Option<RgbImage>, SheetError> {
    while decoder.receive_frame(decoded_frame).is_ok() {
        let pts = decoded_frame
            .timestamp()
            .or_else(|| decoded_frame.pts())
            .unwrap_or(details.start_pts);
        let current = pts_to_frame_number(
            pts,
            details.start_pts,
            details.time_base,
            details.frames_per_second,
        );
        if current < frame_number {
            continue;
        }

        let mut rgb_frame = VideoFrame::empty();
        scaler.run(decoded_frame, &mut rgb_frame)?;
        let buffer = frame_to_rgb_buffer(&rgb_frame, details.width, details.height);
        let image = RgbImage::from_raw(details.width, details.height, buffer).ok_or_else(|| {
            SheetError::VideoDecodeError(format!(
                "Decoded frame {current} does not fill a {}x{} RGB image",
                details.width, details.height
            ))
        })?;
        return Ok(Some(image));
    }
    Ok(None)
}
