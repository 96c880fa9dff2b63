use cascade_detector::config::transform;
use cascade_detector::image::io::{
    load_grayscale_image, save_grayscale_f32, save_grayscale_u8,
};
use cascade_detector::transforms::{
    convolve_separable, crop, difference_map_scaled, flip_horizontal, flip_vertical,
    local_binary_pattern, resize, sobel_magnitude,
};
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = transform::load_config(Path::new(&config_path))?;
    let gray = load_grayscale_image(&config.input)?;
    let view = gray.as_view();
    let dir = &config.output_dir;

    if config.blur.enabled {
        let start = Instant::now();
        let filter = config.blur.kernel.filter();
        let blurred = convolve_separable(&view, &filter, config.blur.border);
        report("blur", start);
        save_grayscale_u8(&blurred.to_u8_saturating(), &dir.join("blur.png"))?;
    }

    if config.sobel {
        let start = Instant::now();
        let mag = sobel_magnitude(&view);
        report("sobel", start);
        save_grayscale_f32(&mag, &dir.join("sobel.png"))?;
    }

    if config.lbp {
        let start = Instant::now();
        let codes = local_binary_pattern(&view);
        report("lbp", start);
        save_grayscale_u8(&codes, &dir.join("lbp.png"))?;
    }

    if let Some(other_path) = &config.diff_with {
        let other = load_grayscale_image(other_path)?;
        let start = Instant::now();
        let diff = difference_map_scaled(&view, &other.as_view(), config.diff_scale)
            .map_err(|e| format!("Difference map failed: {e}"))?;
        report("diff", start);
        save_grayscale_u8(&diff, &dir.join("diff.png"))?;
    }

    if config.flip_horizontal {
        let start = Instant::now();
        let flipped = flip_horizontal(&view);
        report("flip_h", start);
        save_grayscale_u8(&flipped, &dir.join("flip_h.png"))?;
    }

    if config.flip_vertical {
        let start = Instant::now();
        let flipped = flip_vertical(&view);
        report("flip_v", start);
        save_grayscale_u8(&flipped, &dir.join("flip_v.png"))?;
    }

    if let Some(region) = &config.crop {
        let start = Instant::now();
        let cropped = crop(&view, region.x, region.y, region.width, region.height)
            .map_err(|e| format!("Crop failed: {e}"))?;
        report("crop", start);
        save_grayscale_u8(&cropped, &dir.join("crop.png"))?;
    }

    if let Some(size) = &config.resize {
        let start = Instant::now();
        let resized = resize(&view, size.width, size.height, size.method);
        report("resize", start);
        save_grayscale_u8(&resized, &dir.join("resize.png"))?;
    }

    println!("Outputs written to {}", dir.display());
    Ok(())
}

fn report(label: &str, start: Instant) {
    println!(
        "{label:<6} {:>8.3} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
}

fn usage() -> String {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "transform_demo".to_string());
    format!("Usage: {program} <config.json>")
}
