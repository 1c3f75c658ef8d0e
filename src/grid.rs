//! Grid layout and composition.
//!
//! [`GridSpec`] describes the contact-sheet layout, [`GridCanvas`] places
//! frames into it one at a time, and [`compose`] does both for an already
//! captured frame sequence.

use std::{fmt, str::FromStr};

use image::{GenericImage, RgbImage, imageops, imageops::FilterType};

use crate::{capture::Frame, error::SheetError};

/// Upper bound on `rows * cols`.
pub const MAX_CELLS: u32 = 40;

/// Rows and columns of a contact sheet.
///
/// Parsed from a `"rows:cols"` string such as `"4:5"` (four rows of five
/// frames). Both sides must be plain decimal numbers and the grid must have
/// between 1 and [`MAX_CELLS`] cells.
///
/// # Example
///
/// ```
/// use vidsheet::GridSpec;
///
/// let grid: GridSpec = "4:5".parse()?;
/// assert_eq!((grid.rows(), grid.cols(), grid.cells()), (4, 5, 20));
/// assert!("7:6".parse::<GridSpec>().is_err());
/// # Ok::<(), vidsheet::SheetError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
}

impl GridSpec {
    /// Create a grid, rejecting empty grids and grids over [`MAX_CELLS`].
    pub fn new(rows: u32, cols: u32) -> Result<Self, SheetError> {
        let cells = rows.checked_mul(cols).unwrap_or(u32::MAX);
        if cells == 0 || cells > MAX_CELLS {
            return Err(SheetError::GridTooLarge {
                rows,
                cols,
                max: MAX_CELLS,
            });
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells, `rows * cols`.
    pub fn cells(&self) -> u32 {
        self.rows * self.cols
    }

    /// Grid cell `(row, col)` for the frame at sequence position `index`.
    pub fn cell(&self, index: u32) -> (u32, u32) {
        (index / self.cols, index % self.cols)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { rows: 4, cols: 5 }
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.rows, self.cols)
    }
}

impl FromStr for GridSpec {
    type Err = SheetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse_part = |part: &str| -> Option<u32> {
            if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };

        let invalid = || SheetError::InvalidRatio(value.to_string());
        let (rows, cols) = value.split_once(':').ok_or_else(invalid)?;
        let rows = parse_part(rows).ok_or_else(invalid)?;
        let cols = parse_part(cols).ok_or_else(invalid)?;
        Self::new(rows, cols)
    }
}

/// A contact-sheet canvas being filled cell by cell.
///
/// Each frame is copied in as soon as it is produced, so the caller never
/// has to hold more than one decoded frame at a time.
#[derive(Debug)]
pub struct GridCanvas {
    grid: GridSpec,
    frame_width: u32,
    frame_height: u32,
    canvas: RgbImage,
    placed: usize,
}

impl GridCanvas {
    /// Allocate a black canvas of `frame_width * cols` by
    /// `frame_height * rows` pixels.
    pub fn new(grid: GridSpec, frame_width: u32, frame_height: u32) -> Self {
        Self {
            grid,
            frame_width,
            frame_height,
            canvas: RgbImage::new(frame_width * grid.cols(), frame_height * grid.rows()),
            placed: 0,
        }
    }

    /// Pixel offset of the top-left corner of the cell for `index`.
    pub fn offset(&self, index: u32) -> (u32, u32) {
        let (row, col) = self.grid.cell(index);
        (col * self.frame_width, row * self.frame_height)
    }

    /// Copy `frame` into the next free cell, left to right, top to bottom.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::FrameCountMismatch`] when the grid is already
    /// full and [`SheetError::FrameSizeMismatch`] when the frame is not
    /// exactly one cell in size.
    pub fn place(&mut self, frame: &Frame) -> Result<(), SheetError> {
        let expected = self.grid.cells() as usize;
        if self.placed >= expected {
            return Err(SheetError::FrameCountMismatch {
                expected,
                actual: self.placed + 1,
            });
        }

        let image = frame.image();
        if image.dimensions() != (self.frame_width, self.frame_height) {
            return Err(SheetError::FrameSizeMismatch {
                width: self.frame_width,
                height: self.frame_height,
                actual_width: image.width(),
                actual_height: image.height(),
            });
        }

        let (x, y) = self.offset(self.placed as u32);
        self.canvas.copy_from(image, x, y)?;
        self.placed += 1;
        Ok(())
    }

    /// Number of frames placed so far.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// The full-resolution canvas, as filled so far.
    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Check the grid is full and downsample it to half size with a
    /// Lanczos filter.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::FrameCountMismatch`] if any cell is still empty.
    pub fn finish(self) -> Result<RgbImage, SheetError> {
        let expected = self.grid.cells() as usize;
        if self.placed != expected {
            return Err(SheetError::FrameCountMismatch {
                expected,
                actual: self.placed,
            });
        }

        let width = (self.canvas.width() / 2).max(1);
        let height = (self.canvas.height() / 2).max(1);
        log::debug!(
            "Downsampling {}x{} canvas to {}x{}",
            self.canvas.width(),
            self.canvas.height(),
            width,
            height
        );
        Ok(imageops::resize(&self.canvas, width, height, FilterType::Lanczos3))
    }
}

/// Lay out `frames` row-major on a grid and downsample the result by half.
///
/// The frame at position `index` lands at
/// `((index % cols) * frame_width, (index / cols) * frame_height)` on the
/// full-size canvas.
///
/// # Errors
///
/// Returns [`SheetError::FrameCountMismatch`] before touching any pixels if
/// `frames.len()` is not `rows * cols`, and
/// [`SheetError::FrameSizeMismatch`] for a frame of the wrong size.
pub fn compose(
    frames: &[Frame],
    grid: GridSpec,
    frame_width: u32,
    frame_height: u32,
) -> Result<RgbImage, SheetError> {
    let expected = grid.cells() as usize;
    if frames.len() != expected {
        return Err(SheetError::FrameCountMismatch {
            expected,
            actual: frames.len(),
        });
    }

    let mut canvas = GridCanvas::new(grid, frame_width, frame_height);
    for frame in frames {
        canvas.place(frame)?;
    }
    canvas.finish()
}
