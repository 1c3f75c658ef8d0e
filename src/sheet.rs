//! The contact-sheet pipeline.
//!
//! [`ContactSheet::render`] runs every stage in order: validate the options,
//! inspect the video, schedule timestamps, load the watermark font, then
//! capture, annotate, and place one frame per grid cell before downsampling.
//! [`generate`] additionally writes the result to the configured output.
//! Any error aborts the run before the output file is touched.

use std::{
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbImage, codecs::jpeg::JpegEncoder};
use tempfile::NamedTempFile;

use crate::{
    capture::capture,
    error::SheetError,
    grid::{GridCanvas, GridSpec},
    inspect::inspect,
    metadata::VideoMetadata,
    options::{Quality, SheetOptions, output_format},
    progress::ProgressTracker,
    schedule::schedule,
    watermark::{WatermarkFont, annotate},
};

/// A composed, downsampled contact sheet.
#[derive(Debug, Clone)]
#[must_use]
pub struct ContactSheet {
    image: RgbImage,
    grid: GridSpec,
    timestamps: Vec<f64>,
    metadata: VideoMetadata,
}

impl ContactSheet {
    /// Build a contact sheet for the video at `video`.
    ///
    /// Frames are captured strictly in schedule order and each one is
    /// dropped as soon as it has been copied onto the canvas.
    ///
    /// # Errors
    ///
    /// Configuration errors are reported before the video is opened;
    /// afterwards any unreadable video, missing font, or undecodable frame
    /// aborts the whole run.
    pub fn render<P: AsRef<Path>>(video: P, options: &SheetOptions) -> Result<Self, SheetError> {
        let video = video.as_ref();
        options.validate()?;

        let metadata = inspect(video)?;
        let timestamps = schedule(
            metadata.duration_seconds,
            options.grid.cells(),
            options.skip_edges,
        )?;
        let font = WatermarkFont::locate(options.font.as_deref())?;

        let mut canvas = GridCanvas::new(options.grid, metadata.width, metadata.height);
        let mut tracker = ProgressTracker::new(options.progress.clone(), timestamps.len() as u64);

        for &timestamp in &timestamps {
            let frame = annotate(capture(video, timestamp)?, &font);
            canvas.place(&frame)?;
            tracker.advance(timestamp);
        }
        drop(font);

        let image = canvas.finish()?;
        log::debug!(
            "Rendered {} contact sheet {}x{} from {}",
            options.grid,
            image.width(),
            image.height(),
            video.display()
        );

        Ok(Self {
            image,
            grid: options.grid,
            timestamps,
            metadata,
        })
    }

    /// Encode the sheet and write it to `path`.
    ///
    /// The format follows the extension. JPEG output uses
    /// [`Quality::encoder_quality`]; other formats ignore `quality`. The
    /// image is encoded in memory and written to a temporary file next to
    /// `path`, which is then renamed into place, so a failed write never
    /// leaves a partial file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::UnsupportedOutputFormat`] for an unknown
    /// extension, or an I/O / image error if encoding or writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P, quality: Quality) -> Result<(), SheetError> {
        let path = path.as_ref();
        let format = output_format(path)?;
        let bytes = self.encode(format, quality)?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(directory)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|error| error.error)?;
        log::info!("Wrote contact sheet to {}", path.display());
        Ok(())
    }

    /// Encode the sheet in `format` without writing it anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::ImageError`] if the encoder rejects the image.
    pub fn encode(&self, format: ImageFormat, quality: Quality) -> Result<Vec<u8>, SheetError> {
        let mut buffer = Cursor::new(Vec::new());
        if format == ImageFormat::Jpeg {
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.encoder_quality());
            encoder.encode_image(&self.image)?;
        } else {
            log::debug!("Quality setting ignored for {format:?} output");
            self.image.write_to(&mut buffer, format)?;
        }
        Ok(buffer.into_inner())
    }

    /// The downsampled image.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Grid layout of the sheet.
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Capture timestamps in cell order.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Metadata of the source video.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Consume the sheet, returning the image.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct SheetReport {
    /// Metadata of the source video.
    pub metadata: VideoMetadata,
    /// Grid layout used.
    pub grid: GridSpec,
    /// Capture timestamps in cell order.
    pub timestamps: Vec<f64>,
    /// Where the sheet was written.
    pub output: PathBuf,
    /// Final width in pixels.
    pub width: u32,
    /// Final height in pixels.
    pub height: u32,
}

/// Render a contact sheet for `video` and write it to the configured output.
///
/// # Errors
///
/// Any error from [`ContactSheet::render`] or [`ContactSheet::save`]. No
/// output file is created when an error is returned.
///
/// # Example
///
/// ```no_run
/// use vidsheet::SheetOptions;
///
/// let report = vidsheet::generate("input.mp4", &SheetOptions::new())?;
/// println!("{} -> {}x{}", report.output.display(), report.width, report.height);
/// # Ok::<(), vidsheet::SheetError>(())
/// ```
pub fn generate<P: AsRef<Path>>(
    video: P,
    options: &SheetOptions,
) -> Result<SheetReport, SheetError> {
    let sheet = ContactSheet::render(video, options)?;
    sheet.save(&options.output, options.quality)?;

    Ok(SheetReport {
        width: sheet.image.width(),
        height: sheet.image.height(),
        output: options.output.clone(),
        grid: sheet.grid,
        timestamps: sheet.timestamps,
        metadata: sheet.metadata,
    })
}
