//! Timestamp formatting and watermark rendering tests.
//!
//! Rendering tests need a TrueType font; they return early when none of the
//! default font locations exist on this machine.

use image::{Rgb, RgbImage};
use vidsheet::{
    ErrorKind, Frame, LABEL_ANCHOR, SheetError, WatermarkFont, annotate, format_timestamp,
};

fn system_font() -> Option<WatermarkFont> {
    WatermarkFont::locate(None).ok()
}

// ── format_timestamp ─────────────────────────────────────────────

#[test]
fn format_zero() {
    assert_eq!(format_timestamp(0.0), "00:00:00");
}

#[test]
fn format_truncates_fraction() {
    assert_eq!(format_timestamp(502.347), "00:08:22");
    assert_eq!(format_timestamp(59.999), "00:00:59");
}

#[test]
fn format_hours_minutes_seconds() {
    assert_eq!(format_timestamp(3661.0), "01:01:01");
    assert_eq!(format_timestamp(36_000.0), "10:00:00");
}

#[test]
fn format_past_a_hundred_hours_keeps_all_digits() {
    assert_eq!(format_timestamp(360_000.0), "100:00:00");
}

// ── Font location ────────────────────────────────────────────────

#[test]
fn missing_font_is_resource_unavailable() {
    let error = WatermarkFont::locate(Some("no/such/font.ttf".as_ref())).unwrap_err();
    assert!(matches!(error, SheetError::FontNotFound { .. }));
    assert_eq!(error.kind(), ErrorKind::ResourceUnavailable);
}

#[test]
fn invalid_font_file_is_resource_unavailable() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = directory.path().join("broken.ttf");
    std::fs::write(&path, b"definitely not a font").expect("Failed to write file");

    let error = WatermarkFont::open(&path).unwrap_err();
    assert!(matches!(error, SheetError::FontLoad { .. }));
    assert_eq!(error.kind(), ErrorKind::ResourceUnavailable);
}

// ── annotate ─────────────────────────────────────────────────────

#[test]
fn annotate_keeps_size_and_timestamp() {
    let Some(font) = system_font() else {
        return;
    };

    let frame = Frame::new(RgbImage::from_pixel(640, 360, Rgb([40, 90, 160])), 502.347);
    let annotated = annotate(frame, &font);
    assert_eq!(annotated.image().dimensions(), (640, 360));
    assert_eq!(annotated.timestamp(), 502.347);
}

#[test]
fn annotate_draws_outline_and_fill_near_anchor() {
    let Some(font) = system_font() else {
        return;
    };

    let background = Rgb([200, 40, 40]);
    let frame = Frame::new(RgbImage::from_pixel(800, 200, background), 3661.0);
    let annotated = annotate(frame, &font);
    let image = annotated.image();

    let is_near = |value: u8, target: u8| value.abs_diff(target) <= 16;
    let mut outline = 0;
    let mut fill = 0;
    for pixel in image.pixels() {
        let [red, green, blue] = pixel.0;
        if red < 16 && green < 16 && blue < 16 {
            outline += 1;
        }
        // Half-opaque white over the black outline underneath.
        if is_near(red, 128) && is_near(green, 128) && is_near(blue, 128) {
            fill += 1;
        }
    }
    assert!(outline > 0, "Expected a black outline");
    assert!(fill > 0, "Expected a half-transparent fill");
    assert!(image.pixels().all(|pixel| pixel.0 != [255, 255, 255]));
}

#[test]
fn annotate_leaves_far_corner_untouched() {
    let Some(font) = system_font() else {
        return;
    };

    let background = Rgb([10, 200, 30]);
    let frame = Frame::new(RgbImage::from_pixel(1280, 720, background), 42.0);
    let annotated = annotate(frame, &font);
    let image = annotated.image();

    assert_eq!(*image.get_pixel(1279, 719), background);
    assert_eq!(*image.get_pixel(1279, 0), background);
    // The label starts at the anchor, so the pixel right at the origin is
    // outside even the outline.
    let (anchor_x, anchor_y) = LABEL_ANCHOR;
    assert!(anchor_x > 3 && anchor_y > 3);
    assert_eq!(*image.get_pixel(0, 0), background);
}
