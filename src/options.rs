//! Contact-sheet options.
//!
//! [`SheetOptions`] is a builder carrying everything a run needs besides the
//! input path: output quality and location, grid layout, edge skipping,
//! watermark font, and a progress callback.
//!
//! # Example
//!
//! ```no_run
//! use vidsheet::{GridSpec, Quality, SheetOptions};
//!
//! let options = SheetOptions::new()
//!     .with_quality(Quality::new(8)?)
//!     .with_grid("3:4".parse::<GridSpec>()?)
//!     .with_skip_edges(true)
//!     .with_output("sheet.jpg");
//! vidsheet::generate("movie.mkv", &options)?;
//! # Ok::<(), vidsheet::SheetError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;

use crate::{
    error::SheetError,
    grid::GridSpec,
    progress::{NoOpProgress, ProgressCallback},
};

/// Output image quality on a 1–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Lowest accepted quality.
    pub const MIN: u8 = 1;
    /// Highest accepted quality.
    pub const MAX: u8 = 10;

    /// Validate a quality value.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::InvalidQuality`] outside `1..=10`.
    pub fn new(value: i64) -> Result<Self, SheetError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(SheetError::InvalidQuality(value));
        }
        Ok(Self(value as u8))
    }

    /// The 1–10 value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The equivalent encoder quality on a 1–100 scale.
    pub fn encoder_quality(self) -> u8 {
        self.0 * 10
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(6)
    }
}

/// Settings for one contact-sheet run.
#[derive(Clone)]
pub struct SheetOptions {
    pub(crate) quality: Quality,
    pub(crate) grid: GridSpec,
    pub(crate) skip_edges: bool,
    pub(crate) output: PathBuf,
    pub(crate) font: Option<PathBuf>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for SheetOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SheetOptions")
            .field("quality", &self.quality.get())
            .field("grid", &self.grid.to_string())
            .field("skip_edges", &self.skip_edges)
            .field("output", &self.output)
            .field("font", &self.font)
            .finish_non_exhaustive()
    }
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetOptions {
    /// Default output path.
    pub const DEFAULT_OUTPUT: &'static str = "screenshot.jpg";

    /// Defaults: quality 6, a 4:5 grid, no edge skipping, output to
    /// `screenshot.jpg`, font from the system search list, no progress.
    pub fn new() -> Self {
        Self {
            quality: Quality::default(),
            grid: GridSpec::default(),
            skip_edges: false,
            output: PathBuf::from(Self::DEFAULT_OUTPUT),
            font: None,
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the output quality.
    #[must_use]
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the grid layout.
    #[must_use]
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Skip the first and last 90 seconds of the video.
    #[must_use]
    pub fn with_skip_edges(mut self, skip: bool) -> Self {
        self.skip_edges = skip;
        self
    }

    /// Set where the contact sheet is written. The extension picks the
    /// image format.
    #[must_use]
    pub fn with_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = path.into();
        self
    }

    /// Use a specific font file for the watermark.
    #[must_use]
    pub fn with_font<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.font = Some(path.into());
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Output quality.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Grid layout.
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Whether the video edges are skipped.
    pub fn skip_edges(&self) -> bool {
        self.skip_edges
    }

    /// Output path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Configured font path, if any.
    pub fn font(&self) -> Option<&Path> {
        self.font.as_deref()
    }

    /// Check the settings that can be checked without opening the video.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::UnsupportedOutputFormat`] if the output
    /// extension is not a raster format this crate can write.
    pub fn validate(&self) -> Result<ImageFormat, SheetError> {
        output_format(&self.output)
    }
}

/// Image format for an output path, from its extension.
pub(crate) fn output_format(path: &Path) -> Result<ImageFormat, SheetError> {
    ImageFormat::from_path(path)
        .ok()
        .filter(|format| format.writing_enabled())
        .ok_or_else(|| SheetError::UnsupportedOutputFormat(path.to_path_buf()))
}
