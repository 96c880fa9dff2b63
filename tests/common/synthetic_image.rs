/// Dark image with filled squares of the given value at `(x, y, side)`.
pub fn squares_u8(width: usize, height: usize, squares: &[(usize, usize, usize)], value: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![0u8; width * height];
    for &(x0, y0, side) in squares {
        assert!(x0 + side <= width && y0 + side <= height, "square leaves the image");
        for y in y0..y0 + side {
            img[y * width + x0..y * width + x0 + side].fill(value);
        }
    }
    img
}

/// Flat layout of a one-stage, one-node cascade that accepts windows which
/// are uniformly bright.
///
/// The node compares the window mean against `threshold * std_dev`: a flat
/// bright window has `std_dev = 1` (or close to 0) and passes, any window
/// with visible contrast or a dark window falls to the `-1` vote.
pub fn flat_bright_cascade(side: f64, threshold: f64) -> Vec<f64> {
    vec![
        side, side, // base window
        0.0, 1.0, // stage: threshold, one node
        0.0, 1.0, // upright node with one rect
        0.0, 0.0, side, side, 1.0, // rect covering the window
        threshold, -1.0, 1.0,
    ]
}
