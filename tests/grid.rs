//! Grid parsing, placement, and composition tests.
//!
//! Frames are synthetic solid-colour images, so no fixtures are needed.

use image::{ImageFormat, Rgb, RgbImage};
use vidsheet::{ErrorKind, Frame, GridCanvas, GridSpec, MAX_CELLS, SheetError, compose};

const FRAME_WIDTH: u32 = 64;
const FRAME_HEIGHT: u32 = 48;

fn cell_colour(index: u32) -> Rgb<u8> {
    // Distinct, well-separated colours for up to 40 cells.
    Rgb([
        (index * 53 % 256) as u8,
        (index * 97 % 256) as u8,
        (255 - index * 6) as u8,
    ])
}

fn solid_frames(count: u32) -> Vec<Frame> {
    (0..count)
        .map(|index| {
            let image = RgbImage::from_pixel(FRAME_WIDTH, FRAME_HEIGHT, cell_colour(index));
            Frame::new(image, f64::from(index))
        })
        .collect()
}

fn assert_close(actual: Rgb<u8>, expected: Rgb<u8>) {
    for (a, e) in actual.0.iter().zip(expected.0.iter()) {
        assert!(
            (i16::from(*a) - i16::from(*e)).abs() <= 2,
            "Pixel {actual:?} differs from {expected:?}",
        );
    }
}

// ── GridSpec parsing ─────────────────────────────────────────────

#[test]
fn ratio_accepted() {
    let grid: GridSpec = "4:5".parse().expect("Failed to parse ratio");
    assert_eq!(grid.rows(), 4);
    assert_eq!(grid.cols(), 5);
    assert_eq!(grid.cells(), 20);
    assert_eq!(grid.to_string(), "4:5");
}

#[test]
fn ratio_product_limit() {
    assert!("5:8".parse::<GridSpec>().is_ok());
    assert!("40:1".parse::<GridSpec>().is_ok());

    let error = "7:6".parse::<GridSpec>().unwrap_err();
    assert!(matches!(
        error,
        SheetError::GridTooLarge { rows: 7, cols: 6, max: MAX_CELLS }
    ));
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn ratio_format_rejected() {
    for value in ["a:5", "4", "4:5:6", ":5", "4:", "4x5", "-4:5", "+4:5", " 4:5", "4.0:5", ""] {
        let error = value.parse::<GridSpec>().unwrap_err();
        assert!(
            matches!(error, SheetError::InvalidRatio(_)),
            "{value:?} gave {error}",
        );
    }
}

#[test]
fn ratio_zero_rejected() {
    assert!("0:5".parse::<GridSpec>().is_err());
    assert!(GridSpec::new(4, 0).is_err());
}

#[test]
fn huge_ratio_does_not_overflow() {
    assert!("4294967295:4294967295".parse::<GridSpec>().is_err());
}

#[test]
fn default_grid_is_four_by_five() {
    assert_eq!(GridSpec::default(), GridSpec::new(4, 5).unwrap());
}

// ── Placement ─────────────────────────────────────────────────────

#[test]
fn cell_assignment_is_row_major() {
    let grid = GridSpec::new(5, 4).unwrap();
    assert_eq!(grid.cell(0), (0, 0));
    assert_eq!(grid.cell(3), (0, 3));
    assert_eq!(grid.cell(4), (1, 0));
    assert_eq!(grid.cell(7), (1, 3));
    assert_eq!(grid.cell(19), (4, 3));
}

#[test]
fn canvas_offsets() {
    let grid = GridSpec::new(5, 4).unwrap();
    let canvas = GridCanvas::new(grid, FRAME_WIDTH, FRAME_HEIGHT);
    assert_eq!(canvas.offset(7), (3 * FRAME_WIDTH, FRAME_HEIGHT));
    assert_eq!(canvas.canvas().dimensions(), (4 * FRAME_WIDTH, 5 * FRAME_HEIGHT));
}

#[test]
fn canvas_places_frames_without_gaps() {
    let grid = GridSpec::new(5, 4).unwrap();
    let mut canvas = GridCanvas::new(grid, FRAME_WIDTH, FRAME_HEIGHT);
    for frame in solid_frames(20) {
        canvas.place(&frame).expect("Failed to place frame");
    }
    assert_eq!(canvas.placed(), 20);

    let full = canvas.canvas();
    for index in 0..20 {
        let (x, y) = canvas.offset(index);
        assert_eq!(*full.get_pixel(x, y), cell_colour(index));
        assert_eq!(
            *full.get_pixel(x + FRAME_WIDTH - 1, y + FRAME_HEIGHT - 1),
            cell_colour(index)
        );
    }
}

#[test]
fn canvas_rejects_extra_frame() {
    let grid = GridSpec::new(1, 2).unwrap();
    let mut canvas = GridCanvas::new(grid, FRAME_WIDTH, FRAME_HEIGHT);
    let frames = solid_frames(3);
    canvas.place(&frames[0]).unwrap();
    canvas.place(&frames[1]).unwrap();
    let error = canvas.place(&frames[2]).unwrap_err();
    assert!(matches!(error, SheetError::FrameCountMismatch { .. }));
}

#[test]
fn canvas_rejects_wrong_frame_size() {
    let grid = GridSpec::new(2, 2).unwrap();
    let mut canvas = GridCanvas::new(grid, FRAME_WIDTH, FRAME_HEIGHT);
    let frame = Frame::new(RgbImage::new(FRAME_WIDTH + 1, FRAME_HEIGHT), 0.0);
    let error = canvas.place(&frame).unwrap_err();
    assert!(matches!(error, SheetError::FrameSizeMismatch { .. }));
}

#[test]
fn unfinished_canvas_cannot_finish() {
    let grid = GridSpec::new(2, 2).unwrap();
    let mut canvas = GridCanvas::new(grid, FRAME_WIDTH, FRAME_HEIGHT);
    canvas.place(&solid_frames(1)[0]).unwrap();
    let error = canvas.finish().unwrap_err();
    assert!(matches!(
        error,
        SheetError::FrameCountMismatch { expected: 4, actual: 1 }
    ));
}

// ── compose ───────────────────────────────────────────────────────

#[test]
fn compose_rejects_frame_count_mismatch() {
    let grid = GridSpec::new(4, 5).unwrap();
    let error = compose(&solid_frames(19), grid, FRAME_WIDTH, FRAME_HEIGHT).unwrap_err();
    assert!(matches!(
        error,
        SheetError::FrameCountMismatch { expected: 20, actual: 19 }
    ));
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn compose_downsamples_by_half() {
    let grid = GridSpec::new(5, 4).unwrap();
    let frames: Vec<Frame> = (0..20)
        .map(|index| Frame::new(RgbImage::new(64, 50), f64::from(index)))
        .collect();
    let sheet = compose(&frames, grid, 64, 50).expect("Failed to compose");
    // (4w, 5h) = (256, 250) before, (2w, 2.5h) after.
    assert_eq!(sheet.dimensions(), (128, 125));
}

#[test]
fn compose_rounds_odd_sizes_down() {
    let grid = GridSpec::new(1, 1).unwrap();
    let frame = Frame::new(RgbImage::new(33, 17), 0.0);
    let sheet = compose(&[frame], grid, 33, 17).expect("Failed to compose");
    assert_eq!(sheet.dimensions(), (16, 8));
}

#[test]
fn compose_round_trip_through_png() {
    let grid = GridSpec::new(5, 4).unwrap();
    let sheet = compose(&solid_frames(20), grid, FRAME_WIDTH, FRAME_HEIGHT)
        .expect("Failed to compose");

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = directory.path().join("sheet.png");
    sheet.save_with_format(&path, ImageFormat::Png).expect("Failed to save");
    let reloaded = image::open(&path).expect("Failed to reopen").to_rgb8();
    assert_eq!(reloaded.dimensions(), (2 * FRAME_WIDTH, 5 * FRAME_HEIGHT / 2));

    let (cell_width, cell_height) = (FRAME_WIDTH / 2, FRAME_HEIGHT / 2);
    for index in 0..20 {
        let (row, col) = grid.cell(index);
        let center_x = col * cell_width + cell_width / 2;
        let center_y = row * cell_height + cell_height / 2;
        assert_close(*reloaded.get_pixel(center_x, center_y), cell_colour(index));
    }
}
