//! Timestamp watermarks.
//!
//! Every frame on a contact sheet carries its capture time as an
//! `HH:MM:SS` label in the top-left corner: a solid black outline with a
//! half-transparent white fill, readable over both dark and bright frames.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale};
use image::{GrayImage, Luma, Rgb};
use imageproc::drawing::draw_text_mut;

use crate::{capture::Frame, error::SheetError};

/// Label position, in pixels from the top-left corner of the frame.
pub const LABEL_ANCHOR: (i32, i32) = (10, 10);

/// Em size of the label glyphs, in pixels.
pub const GLYPH_SIZE: f32 = 100.0;

/// Outline thickness: the black pass is drawn at every offset within this
/// many pixels of the anchor.
pub const OUTLINE_RADIUS: i32 = 3;

/// Opacity of the white fill.
pub const FILL_OPACITY: f32 = 0.5;

/// Fonts tried, in order, when no font path is configured.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "arial.ttf",
];

/// Format seconds as `HH:MM:SS`, truncating any fraction.
///
/// # Example
///
/// ```
/// assert_eq!(vidsheet::format_timestamp(502.347), "00:08:22");
/// assert_eq!(vidsheet::format_timestamp(3661.0), "01:01:01");
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// A loaded TrueType/OpenType font sized for watermark labels.
pub struct WatermarkFont {
    font: FontVec,
    scale: PxScale,
    path: PathBuf,
}

impl std::fmt::Debug for WatermarkFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkFont")
            .field("path", &self.path)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl WatermarkFont {
    /// Load a font file.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::FontLoad`] if the file cannot be read or is not
    /// a valid font.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let load_error = |reason: String| SheetError::FontLoad {
            path: path.to_path_buf(),
            reason,
        };

        let data = std::fs::read(path).map_err(|error| load_error(error.to_string()))?;
        let font = FontVec::try_from_vec(data).map_err(|error| load_error(error.to_string()))?;

        // PxScale is the ascent-to-descent height; convert from an em size.
        let scale = match font.units_per_em() {
            Some(units_per_em) => PxScale::from(GLYPH_SIZE * font.height_unscaled() / units_per_em),
            None => PxScale::from(GLYPH_SIZE),
        };

        log::debug!("Loaded watermark font {}", path.display());
        Ok(Self {
            font,
            scale,
            path: path.to_path_buf(),
        })
    }

    /// Load `path` if given, otherwise the first existing entry of
    /// [`DEFAULT_FONT_CANDIDATES`].
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::FontNotFound`] if no candidate exists, or
    /// [`SheetError::FontLoad`] if the chosen file is not a usable font.
    pub fn locate(path: Option<&Path>) -> Result<Self, SheetError> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(SheetError::FontNotFound {
                    searched: path.display().to_string(),
                });
            }
            return Self::open(path);
        }

        DEFAULT_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.is_file())
            .map(Self::open)
            .unwrap_or_else(|| {
                Err(SheetError::FontNotFound {
                    searched: DEFAULT_FONT_CANDIDATES.join(", "),
                })
            })
    }

    /// Path the font was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Stamp the frame's timestamp onto its top-left corner.
///
/// The label is painted in black at every offset within
/// [`OUTLINE_RADIUS`] of [`LABEL_ANCHOR`] (except the anchor itself), then
/// once in white at [`FILL_OPACITY`] on the anchor.
pub fn annotate(frame: Frame, font: &WatermarkFont) -> Frame {
    let timestamp = frame.timestamp();
    let label = format_timestamp(timestamp);
    let mut image = frame.into_image();
    let (anchor_x, anchor_y) = LABEL_ANCHOR;

    for dx in -OUTLINE_RADIUS..=OUTLINE_RADIUS {
        for dy in -OUTLINE_RADIUS..=OUTLINE_RADIUS {
            if dx == 0 && dy == 0 {
                continue;
            }
            draw_text_mut(
                &mut image,
                Rgb([0, 0, 0]),
                anchor_x + dx,
                anchor_y + dy,
                font.scale,
                &font.font,
                &label,
            );
        }
    }

    // Render the fill as a coverage mask, then blend it at reduced opacity.
    let mut coverage = GrayImage::new(image.width(), image.height());
    draw_text_mut(
        &mut coverage,
        Luma([255]),
        anchor_x,
        anchor_y,
        font.scale,
        &font.font,
        &label,
    );
    for (pixel, mask) in image.pixels_mut().zip(coverage.pixels()) {
        if mask[0] == 0 {
            continue;
        }
        let alpha = f32::from(mask[0]) / 255.0 * FILL_OPACITY;
        for channel in pixel.0.iter_mut() {
            let blended = f32::from(*channel) * (1.0 - alpha) + 255.0 * alpha;
            *channel = blended.round().clamp(0.0, 255.0) as u8;
        }
    }

    Frame::new(image, timestamp)
}
