mod common;

use cascade_detector::config::load_cascade;
use cascade_detector::image::ImageU8;
use cascade_detector::stages::{IntegralImages, Window, WindowEvaluator};
use cascade_detector::{
    detect, CascadeDescriptor, CascadeDetector, CascadeError, DetectError, DetectorParams, Rect,
};
use common::synthetic_image::{flat_bright_cascade, squares_u8};
use common::init_logging;

fn unit_scale_params() -> DetectorParams {
    // First level runs at exactly scale 1.
    DetectorParams::default()
        .with_initial_scale(0.8)
        .with_scale_factor(1.25)
        .with_step_size(1.0)
}

#[test]
fn single_bright_square_is_found_once() {
    init_logging();
    let (width, height) = (48usize, 40usize);
    let buffer = squares_u8(width, height, &[(20, 12, 10)], 255);
    let image = ImageU8::new(width, height, &buffer).unwrap();
    let cascade = CascadeDescriptor::from_flat(&flat_bright_cascade(10.0, 200.0)).unwrap();
    let detector = CascadeDetector::new(cascade);
    let params = unit_scale_params();

    let raw = detector.detect_raw(&image, &params).unwrap();
    assert_eq!(raw, vec![Rect::raw(20, 12, 10, 10)], "raw detections {raw:?}");

    let merged = detector.detect(&image, &params).unwrap();
    assert_eq!(merged, raw);
    assert_eq!(merged[0].count, 1);
}

#[test]
fn separate_squares_stay_separate() {
    init_logging();
    let (width, height) = (80usize, 40usize);
    let buffer = squares_u8(width, height, &[(5, 5, 10), (50, 20, 10)], 255);
    let image = ImageU8::new(width, height, &buffer).unwrap();
    let cascade = CascadeDescriptor::from_flat(&flat_bright_cascade(10.0, 200.0)).unwrap();

    let mut merged = detect(&image, &cascade, &unit_scale_params()).unwrap();
    merged.sort_by_key(|r| (r.x, r.y));
    assert_eq!(
        merged,
        vec![Rect::raw(5, 5, 10, 10), Rect::raw(50, 20, 10, 10)]
    );
}

#[test]
fn overlapping_hits_collapse_into_one_detection() {
    init_logging();
    let (width, height) = (64usize, 64usize);
    let buffer = squares_u8(width, height, &[(22, 22, 20)], 255);
    let image = ImageU8::new(width, height, &buffer).unwrap();
    let cascade = CascadeDescriptor::from_flat(&flat_bright_cascade(10.0, 200.0)).unwrap();
    let detector = CascadeDetector::new(cascade);
    let params = unit_scale_params();

    let report = detector.detect_with_diagnostics(&image, &params).unwrap();
    assert!(report.result.raw_count > 100, "raw={}", report.result.raw_count);
    assert_eq!(report.result.detections.len(), 1);

    let hit = report.result.detections[0];
    assert_eq!(hit.count, report.result.raw_count);
    assert!(hit.x >= 22 && hit.right() <= 42, "{hit:?}");
    assert!(hit.y >= 22 && hit.bottom() <= 42, "{hit:?}");

    let accepted: usize = report.trace.scan.levels.iter().map(|l| l.accepted).sum();
    assert_eq!(accepted, report.result.raw_count);
    for level in &report.trace.scan.levels {
        assert_eq!(level.accepted + level.rejected(), level.windows);
    }
    assert!(report.summary().contains("rejected"));
    assert_eq!(report.trace.merge.merged_count, 1);
    assert!(!report.trace.scan.truncated);
}

#[test]
fn uniform_contrast_change_keeps_the_detection() {
    // Mean and std scale together, so the normalised decision is unchanged.
    let (width, height) = (48usize, 40usize);
    let cascade = CascadeDescriptor::from_flat(&flat_bright_cascade(10.0, 50.0)).unwrap();
    let detector = CascadeDetector::new(cascade);
    for value in [120u8, 255] {
        let buffer = squares_u8(width, height, &[(20, 12, 10)], value);
        let image = ImageU8::new(width, height, &buffer).unwrap();
        let raw = detector.detect_raw(&image, &unit_scale_params()).unwrap();
        assert_eq!(raw, vec![Rect::raw(20, 12, 10, 10)], "value {value}");
    }
}

#[test]
fn tilted_feature_reads_the_rotated_table() {
    let (width, height) = (16usize, 16usize);
    let buffer = squares_u8(width, height, &[(4, 4, 8)], 200);
    let image = ImageU8::new(width, height, &buffer).unwrap();
    let tables = IntegralImages::build(&image);

    // One 2x2 tilted rect at window offset (4, 4): an 8-pixel diamond with
    // its top corner at (8, 8), fully inside the bright block.
    #[rustfmt::skip]
    let flat = [
        8.0, 8.0,
        0.0, 1.0,
        1.0, 1.0, 4.0, 4.0, 2.0, 2.0, 1.0, 0.0, -1.0, 1.0,
    ];
    let cascade = CascadeDescriptor::from_flat(&flat).unwrap();
    assert!(cascade.has_tilted_nodes());
    let evaluator = WindowEvaluator::new(&cascade, &tables);
    let bright = Window {
        x: 4,
        y: 4,
        width: 8,
        height: 8,
        scale: 1.0,
    };
    let outcome = evaluator.evaluate_traced(&bright).unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.stages_evaluated, 1);
    let direct = tables.tilted.rotated_sum(8, 8, 2, 2);
    assert_eq!(direct, 8 * 200);
}

#[test]
fn image_smaller_than_the_window_gives_nothing() {
    let buffer = vec![255u8; 9 * 9];
    let image = ImageU8::new(9, 9, &buffer).unwrap();
    let cascade = CascadeDescriptor::from_flat(&flat_bright_cascade(10.0, 200.0)).unwrap();
    let rects = detect(&image, &cascade, &unit_scale_params()).unwrap();
    assert!(rects.is_empty());
}

#[test]
fn malformed_cascade_is_reported() {
    let mut flat = flat_bright_cascade(10.0, 200.0);
    flat.truncate(flat.len() - 2);
    let err = CascadeDescriptor::from_flat(&flat).unwrap_err();
    assert!(matches!(err, CascadeError::Truncated { .. }), "{err}");
    let detect_err: DetectError = err.into();
    assert!(detect_err.to_string().contains("truncated"));
}

#[test]
fn cascade_file_round_trips_through_disk() {
    let cascade = CascadeDescriptor::from_flat(&flat_bright_cascade(12.0, 150.0)).unwrap();
    let dir = std::env::temp_dir().join(format!("cascade_detector_e2e_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let json_path = dir.join("cascade.json");
    std::fs::write(&json_path, serde_json::to_string(&cascade.to_flat()).unwrap()).unwrap();
    assert_eq!(load_cascade(&json_path).unwrap(), cascade);

    let text_path = dir.join("cascade.txt");
    let text: Vec<String> = cascade.to_flat().iter().map(|v| v.to_string()).collect();
    std::fs::write(&text_path, text.join(", ")).unwrap();
    assert_eq!(load_cascade(&text_path).unwrap(), cascade);

    assert!(load_cascade(&dir.join("missing.txt")).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
