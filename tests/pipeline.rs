//! End-to-end pipeline tests against real video.
//!
//! Tests require fixture files from `tests/fixtures/generate_fixtures.sh`
//! and a system TrueType font; they return early when either is missing.

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use vidsheet::{
    ContactSheet, GridSpec, ProgressCallback, ProgressInfo, Quality, SheetOptions, WatermarkFont,
};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

fn fixtures_available() -> bool {
    Path::new(sample_video_path()).exists() && WatermarkFont::locate(None).is_ok()
}

#[test]
fn inspect_sample_video() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let metadata = vidsheet::inspect(path).expect("Failed to inspect fixture");
    // generate_fixtures.sh: 640x480, 30 fps, 5 seconds.
    assert_eq!((metadata.width, metadata.height), (640, 480));
    assert!((metadata.frames_per_second - 30.0).abs() < 0.01);
    assert!((metadata.duration_seconds - 5.0).abs() < 0.1);
    assert_eq!(
        metadata.duration_seconds,
        (metadata.frame_count as f64 / metadata.frames_per_second * 1000.0).round() / 1000.0
    );
}

#[test]
fn capture_returns_rgb_frame_of_video_size() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let frame = vidsheet::capture(path, 2.5).expect("Failed to capture frame");
    assert_eq!(frame.image().dimensions(), (640, 480));
    assert_eq!(frame.timestamp(), 2.5);
}

#[test]
fn capture_is_repeatable_in_any_order() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let late = vidsheet::capture(path, 4.0).expect("Failed to capture late frame");
    let early = vidsheet::capture(path, 1.0).expect("Failed to capture early frame");
    let late_again = vidsheet::capture(path, 4.0).expect("Failed to capture late frame");
    assert_eq!(late.image(), late_again.image());
    assert_ne!(early.image(), late.image());
}

#[test]
fn capture_counts_from_stream_start() {
    let path = sample_video_path();
    let offset_path = "tests/fixtures/sample_video_offset.ts";
    if !Path::new(path).exists() || !Path::new(offset_path).exists() {
        return;
    }

    // Same frames, but the transport stream's timestamps start at ~2s.
    for timestamp in [0.0, 1.0, 2.5, 4.0] {
        let reference = vidsheet::capture(path, timestamp).expect("Failed to capture frame");
        let shifted =
            vidsheet::capture(offset_path, timestamp).expect("Failed to capture shifted frame");
        assert_eq!(
            reference.image(),
            shifted.image(),
            "Frames at {timestamp}s differ between containers"
        );
    }
}

#[test]
fn render_default_grid() {
    if !fixtures_available() {
        return;
    }

    let sheet = ContactSheet::render(sample_video_path(), &SheetOptions::new())
        .expect("Failed to render contact sheet");
    assert_eq!(sheet.timestamps().len(), 20);
    // 5 columns x 4 rows of 640x480, halved.
    assert_eq!(sheet.image().dimensions(), (5 * 320, 4 * 240));
}

#[test]
fn generate_writes_jpeg_with_report() {
    if !fixtures_available() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("sheet.jpg");
    let options = SheetOptions::new()
        .with_grid(GridSpec::new(2, 3).unwrap())
        .with_quality(Quality::new(9).unwrap())
        .with_output(&output);

    let report = vidsheet::generate(sample_video_path(), &options).expect("Failed to generate");
    assert_eq!(report.output, output);
    assert_eq!(report.timestamps.len(), 6);
    assert_eq!((report.width, report.height), (3 * 320, 2 * 240));

    let written = image::open(&output).expect("Failed to open written sheet");
    assert_eq!((written.width(), written.height()), (report.width, report.height));
}

#[test]
fn higher_quality_produces_larger_jpeg() {
    if !fixtures_available() {
        return;
    }

    let options = SheetOptions::new().with_grid(GridSpec::new(1, 2).unwrap());
    let sheet =
        ContactSheet::render(sample_video_path(), &options).expect("Failed to render sheet");

    let low = sheet
        .encode(image::ImageFormat::Jpeg, Quality::new(1).unwrap())
        .expect("Failed to encode");
    let high = sheet
        .encode(image::ImageFormat::Jpeg, Quality::new(10).unwrap())
        .expect("Failed to encode");
    assert!(high.len() > low.len());
}

#[test]
fn progress_reports_every_frame() {
    if !fixtures_available() {
        return;
    }

    struct CountingProgress {
        calls: AtomicU64,
    }

    impl ProgressCallback for CountingProgress {
        fn on_progress(&self, info: &ProgressInfo) {
            let previous = self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(info.current, previous + 1);
            assert_eq!(info.total, 4);
        }
    }

    let progress = Arc::new(CountingProgress {
        calls: AtomicU64::new(0),
    });
    let options = SheetOptions::new()
        .with_grid(GridSpec::new(2, 2).unwrap())
        .with_progress(progress.clone());

    ContactSheet::render(sample_video_path(), &options).expect("Failed to render sheet");
    assert_eq!(progress.calls.load(Ordering::SeqCst), 4);
}
