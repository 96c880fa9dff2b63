use cascade_detector::image::ImageU8;
use cascade_detector::stages::IntegralImages;
use cascade_detector::{CascadeDescriptor, CascadeDetector, DetectorParams};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn textured(width: usize, height: usize) -> Vec<u8> {
    (0..width * height)
        .map(|i| ((i * 31 + (i / width) * 17) % 251) as u8)
        .collect()
}

/// Three stages of two-rect edge features on a 24x24 window.
fn synthetic_cascade() -> CascadeDescriptor {
    let mut flat = vec![24.0, 24.0];
    for stage in 0..3 {
        flat.extend_from_slice(&[-0.5, 2.0]);
        for node in 0..2 {
            let offset = (stage * 4 + node * 2) as f64;
            flat.extend_from_slice(&[
                0.0, 2.0,
                offset, 0.0, 12.0, 24.0, 1.0,
                offset + 6.0, 0.0, 6.0, 24.0, -2.0,
                0.01, -1.0, 1.0,
            ]);
        }
    }
    match CascadeDescriptor::from_flat(&flat) {
        Ok(c) => c,
        Err(err) => panic!("benchmark cascade is malformed: {err}"),
    }
}

fn bench_integral(c: &mut Criterion) {
    let (w, h) = (640usize, 480usize);
    let data = textured(w, h);
    let image = ImageU8::new(w, h, &data).unwrap();
    c.bench_function("integral_640x480", |b| {
        b.iter(|| IntegralImages::build(black_box(&image)))
    });
}

fn bench_detect(c: &mut Criterion) {
    let (w, h) = (320usize, 240usize);
    let data = textured(w, h);
    let image = ImageU8::new(w, h, &data).unwrap();
    let detector = CascadeDetector::new(synthetic_cascade());
    let params = DetectorParams::default();
    c.bench_function("detect_320x240", |b| {
        b.iter(|| detector.detect(black_box(&image), &params).unwrap())
    });
}

criterion_group!(benches, bench_integral, bench_detect);
criterion_main!(benches);
