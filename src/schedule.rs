//! Screenshot timestamp scheduling.
//!
//! [`schedule`] is a pure function of the video duration, the number of grid
//! cells, and the edge-skip flag. It splits the usable window into
//! `cells + 1` equal parts and takes the boundaries between them, so the
//! first screenshot is never at `t = 0` and the last is never at the very
//! end.

use crate::{conversion::round_to, error::SheetError};

/// Seconds excluded at each end of the video when edge skipping is enabled.
pub const EDGE_SKIP_SECONDS: f64 = 90.0;

/// Compute the capture timestamps, in seconds, for a grid of `cells` frames.
///
/// Without edge skipping, timestamp `i` (for `i` in `1..=cells`) is
/// `i * duration / (cells + 1)`. With edge skipping the window shrinks by
/// [`EDGE_SKIP_SECONDS`] on both sides and every sample is shifted
/// [`EDGE_SKIP_SECONDS`] later. Timestamps are rounded to milliseconds and
/// returned in strictly increasing order; position `i` in the result is grid
/// cell `i` in row-major order.
///
/// # Errors
///
/// - [`SheetError::InvalidDuration`] if `duration` is not a positive number.
/// - [`SheetError::GridTooLarge`] if `cells` is zero.
/// - [`SheetError::DegenerateSkipWindow`] if `skip_edges` is set and the
///   video is not longer than twice [`EDGE_SKIP_SECONDS`].
/// - [`SheetError::ScheduleTooDense`] if millisecond rounding would collapse
///   two timestamps together or onto zero.
///
/// # Example
///
/// ```
/// let timestamps = vidsheet::schedule(1260.0, 20, false)?;
/// assert_eq!(timestamps.len(), 20);
/// assert_eq!(timestamps[0], 60.0);
/// assert_eq!(timestamps[19], 1200.0);
/// # Ok::<(), vidsheet::SheetError>(())
/// ```
pub fn schedule(duration: f64, cells: u32, skip_edges: bool) -> Result<Vec<f64>, SheetError> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SheetError::InvalidDuration(duration));
    }
    if cells == 0 {
        return Err(SheetError::GridTooLarge {
            rows: 0,
            cols: 0,
            max: crate::grid::MAX_CELLS,
        });
    }

    let (window, offset) = if skip_edges {
        if duration <= 2.0 * EDGE_SKIP_SECONDS {
            return Err(SheetError::DegenerateSkipWindow {
                duration,
                edge: EDGE_SKIP_SECONDS,
            });
        }
        (duration - 2.0 * EDGE_SKIP_SECONDS, EDGE_SKIP_SECONDS)
    } else {
        (duration, 0.0)
    };

    let part = window / f64::from(cells + 1);
    let timestamps: Vec<f64> = (1..=cells)
        .map(|index| round_to(part * f64::from(index) + offset, 3))
        .collect();

    let increasing = timestamps.windows(2).all(|pair| pair[0] < pair[1]);
    if timestamps[0] <= offset || !increasing {
        return Err(SheetError::ScheduleTooDense {
            duration: window,
            cells,
        });
    }

    log::debug!(
        "Scheduled {} timestamps over {:.3}s (skip_edges={}): {:?}",
        cells,
        window,
        skip_edges,
        timestamps
    );

    Ok(timestamps)
}
