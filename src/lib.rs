//! # vidsheet
//!
//! Build a single contact-sheet image from a video: evenly-spaced frames,
//! each stamped with its `HH:MM:SS` capture time, laid out on a grid.
//!
//! Decoding goes through FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; composition
//! and encoding use [`image`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use vidsheet::SheetOptions;
//!
//! let options = SheetOptions::new().with_output("sheet.jpg");
//! let report = vidsheet::generate("input.mp4", &options)?;
//! println!("{} frames -> {}", report.timestamps.len(), report.output.display());
//! # Ok::<(), vidsheet::SheetError>(())
//! ```
//!
//! ## Pipeline
//!
//! Each stage is public and usable on its own:
//!
//! 1. [`inspect`] reads duration, frame rate, and resolution.
//! 2. [`schedule`] picks `rows * cols` timestamps, optionally skipping the
//!    first and last 90 seconds.
//! 3. [`capture`] decodes the frame at one timestamp.
//! 4. [`annotate`] stamps the timestamp onto the frame.
//! 5. [`GridCanvas`] / [`compose`] lay the frames out and downsample by half.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed, and a TrueType font must
//! be available for the watermark (see [`DEFAULT_FONT_CANDIDATES`]).

mod conversion;
pub mod capture;
pub mod error;
pub mod ffmpeg;
pub mod grid;
pub mod inspect;
pub mod metadata;
pub mod options;
pub mod progress;
pub mod schedule;
pub mod sheet;
pub mod watermark;

pub use capture::{Frame, capture};
pub use error::{ErrorKind, SheetError};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use grid::{GridCanvas, GridSpec, MAX_CELLS, compose};
pub use inspect::inspect;
pub use metadata::VideoMetadata;
pub use options::{Quality, SheetOptions};
pub use progress::{ProgressCallback, ProgressInfo};
pub use schedule::{EDGE_SKIP_SECONDS, schedule};
pub use sheet::{ContactSheet, SheetReport, generate};
pub use watermark::{
    DEFAULT_FONT_CANDIDATES, LABEL_ANCHOR, WatermarkFont, annotate, format_timestamp,
};
