//! Build a contact sheet stage by stage.
//!
//! Runs the same steps as `vidsheet::generate`, printing each timestamp as
//! it is captured.
//!
//! Usage:
//!   cargo run --example contact_sheet -- <input_file> [rows:cols] [output]

use std::error::Error;

use vidsheet::{GridCanvas, GridSpec, Quality, WatermarkFont};

fn main() -> Result<(), Box<dyn Error>> {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.mp4".to_string());
    let grid: GridSpec = std::env::args()
        .nth(2)
        .map(|value| value.parse())
        .transpose()?
        .unwrap_or_default();
    let output_path = std::env::args()
        .nth(3)
        .unwrap_or_else(|| "contact_sheet.jpg".to_string());

    let metadata = vidsheet::inspect(&input_path)?;
    println!(
        "Video: {}x{}, {:.3}s, creating {} grid",
        metadata.width, metadata.height, metadata.duration_seconds, grid,
    );

    let timestamps = vidsheet::schedule(metadata.duration_seconds, grid.cells(), false)?;
    let font = WatermarkFont::locate(None)?;
    println!("Watermark font: {}", font.path().display());

    let mut canvas = GridCanvas::new(grid, metadata.width, metadata.height);
    for &timestamp in &timestamps {
        let frame = vidsheet::annotate(vidsheet::capture(&input_path, timestamp)?, &font);
        canvas.place(&frame)?;
        println!("  {} ({timestamp:.3}s)", vidsheet::format_timestamp(timestamp));
    }

    let sheet = canvas.finish()?;
    let quality = Quality::default();
    let mut file = std::fs::File::create(&output_path)?;
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut file, quality.encoder_quality())
        .encode_image(&sheet)?;
    println!("Saved {}x{} sheet to {output_path}", sheet.width(), sheet.height());

    Ok(())
}
