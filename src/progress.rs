//! Progress reporting.
//!
//! A contact sheet takes one seek-and-decode per cell, which can add up to
//! several seconds on long videos. [`ProgressCallback`] lets callers observe
//! the capture loop.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vidsheet::{ProgressCallback, ProgressInfo, SheetOptions};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{}/{} at {:.3}s", info.current, info.total, info.timestamp);
//!     }
//! }
//!
//! let options = SheetOptions::new().with_progress(Arc::new(PrintProgress));
//! vidsheet::generate("input.mp4", &options)?;
//! # Ok::<(), vidsheet::SheetError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// A snapshot of capture progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames captured and placed so far.
    pub current: u64,
    /// Frames the sheet needs in total.
    pub total: u64,
    /// Timestamp of the frame just captured, in seconds.
    pub timestamp: f64,
    /// Wall-clock time since the first capture started.
    pub elapsed: Duration,
}

impl ProgressInfo {
    /// Completion percentage, 0.0 – 100.0.
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.current as f32 / self.total as f32 * 100.0
    }
}

/// Trait for receiving progress updates.
///
/// Callbacks only observe the run; they cannot stop it.
pub trait ProgressCallback: Send + Sync {
    /// Called after each frame is captured, watermarked, and placed.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. This is the default.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Counts completed frames and forwards snapshots to a callback.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: u64,
    current: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, total: u64) -> Self {
        Self {
            callback,
            total,
            current: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one finished frame.
    pub(crate) fn advance(&mut self, timestamp: f64) {
        self.current += 1;
        self.callback.on_progress(&ProgressInfo {
            current: self.current,
            total: self.total,
            timestamp,
            elapsed: self.start_time.elapsed(),
        });
    }
}
