use cascade_detector::image::ImageU8;
use cascade_detector::{CascadeDescriptor, CascadeDetector, DetectorParams};

fn main() {
    // Demo stub: a fake 8-bit buffer with one bright square and a one-node
    // cascade that fires on bright windows.
    let w = 160usize;
    let h = 120usize;
    let mut gray = vec![0u8; w * h];
    for y in 40..64 {
        gray[y * w + 60..y * w + 84].fill(255);
    }
    let img = ImageU8 {
        w,
        h,
        stride: w,
        data: &gray,
    };

    #[rustfmt::skip]
    let flat = [
        24.0, 24.0,
        0.0, 1.0,
        0.0, 1.0, 0.0, 0.0, 24.0, 24.0, 1.0, 200.0, -1.0, 1.0,
    ];
    let cascade = match CascadeDescriptor::from_flat(&flat) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let det = CascadeDetector::new(cascade);
    match det.detect_with_diagnostics(&img, &DetectorParams::default()) {
        Ok(report) => println!(
            "detections={} raw={} latency_ms={:.3}",
            report.result.detections.len(),
            report.result.raw_count,
            report.result.latency_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
