//! Internal utility functions.
//!
//! Helpers for pixel-data copying and for converting between seconds, frame
//! numbers, and FFmpeg timestamps.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};
use ffmpeg_sys_next::{AV_NOPTS_VALUE, AV_TIME_BASE};

/// Copy the first plane of a packed RGB24 frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3), which
/// is stripped so the result can be handed to [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_length {
        return data[..row_length * (height as usize)].to_vec();
    }

    let mut buffer = Vec::with_capacity(row_length * (height as usize));
    for row in 0..(height as usize) {
        let row_start = row * stride;
        buffer.extend_from_slice(&data[row_start..row_start + row_length]);
    }
    buffer
}

/// Round `value` to the nearest decimal with `places` fractional digits.
///
/// Rounds the exact binary value, so `1.0005` (stored just below the tie)
/// becomes `1.0`; exact ties go to the even digit.
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Frame index shown at `seconds`: `floor(seconds * fps)`.
pub(crate) fn seconds_to_frame_number(seconds: f64, frames_per_second: f64) -> u64 {
    (seconds * frames_per_second).floor().max(0.0) as u64
}

/// First PTS of a stream, treating an unset start time as zero.
pub(crate) fn stream_start_pts(start_time: i64) -> i64 {
    if start_time == AV_NOPTS_VALUE {
        0
    } else {
        start_time
    }
}

/// Convert a PTS in `time_base` units to seconds.
pub(crate) fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * f64::from(time_base.numerator()) / f64::from(time_base.denominator())
}

/// Container-level seek target for a frame, in `AV_TIME_BASE` units.
///
/// `Input::seek` with no stream index expects absolute microseconds, not the
/// stream's own time base, so the stream's start offset is added back.
pub(crate) fn frame_number_to_seek_timestamp(
    frame_number: u64,
    frames_per_second: f64,
    start_seconds: f64,
) -> i64 {
    let seconds = frame_number as f64 / frames_per_second + start_seconds;
    (seconds * f64::from(AV_TIME_BASE)) as i64
}

/// Map a PTS in the stream's time base to a frame index counted from the
/// stream's first PTS.
pub(crate) fn pts_to_frame_number(
    pts: i64,
    start_pts: i64,
    time_base: Rational,
    frames_per_second: f64,
) -> u64 {
    let seconds = pts_to_seconds(pts.saturating_sub(start_pts), time_base);
    seconds_to_frame_number(seconds, frames_per_second)
}

/// Frames per second from a rational rate, or `None` when the rate is unset.
pub(crate) fn rational_to_fps(rate: Rational) -> Option<f64> {
    if rate.numerator() <= 0 || rate.denominator() <= 0 {
        return None;
    }
    Some(f64::from(rate.numerator()) / f64::from(rate.denominator()))
}
