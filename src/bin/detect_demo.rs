use cascade_detector::config::detect::{self, OutputFormat};
use cascade_detector::config::load_cascade;
use cascade_detector::draw::{draw_rects, DrawStyle};
use cascade_detector::image::io::{load_grayscale_image, save_grayscale_u8, write_json_file};
use cascade_detector::{CascadeDetector, DetectionReport};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = detect::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let cascade = load_cascade(&config.cascade)?;
    let detector = CascadeDetector::new(cascade);
    let report = detector
        .detect_with_diagnostics(&gray.as_view(), &config.detector)
        .map_err(|e| format!("Detection failed: {e}"))?;

    if config.output.format.includes_text() {
        print_text_summary(&report);
    }

    if config.output.format.includes_json() {
        if let Some(path) = &config.output.json_out {
            write_json_file(path, &report)?;
            println!("JSON report written to {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if config.output.format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }

    if let Some(path) = &config.output.overlay_image {
        let mut overlay = gray.clone();
        draw_rects(
            &mut overlay,
            &report.result.detections,
            255,
            DrawStyle::Outline { thickness: 2 },
        );
        save_grayscale_u8(&overlay, path)?;
        if config.output.format.includes_text() {
            println!("Overlay written to {}", path.display());
        }
    }

    Ok(())
}

fn print_text_summary(report: &DetectionReport) {
    println!("Detection summary");
    println!("{}", report.summary());
    for (i, r) in report.result.detections.iter().enumerate() {
        println!(
            "  #{i}: x={} y={} {}x{} (merged from {})",
            r.x, r.y, r.width, r.height, r.count
        );
    }
    for stage in &report.trace.timings.stages {
        println!("  {:<10} {:>8.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn usage() -> String {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "detect_demo".to_string());
    format!("Usage: {program} <config.json>")
}
