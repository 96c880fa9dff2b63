//! 3×3 Sobel gradient magnitude with border clamping.
use crate::image::{ImageF32, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// `sqrt(gx² + gy²)` per pixel, in intensity units (no normalisation).
pub fn sobel_magnitude<I: ImageView<Pixel = u8>>(image: &I) -> ImageF32 {
    let (w, h) = image.dimensions();
    let mut mag = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return mag;
    }

    for y in 0..h {
        let rows = [
            image.row(y.saturating_sub(1)),
            image.row(y),
            image.row((y + 1).min(h - 1)),
        ];
        let out = mag.row_mut(y);
        for (x, o) in out.iter_mut().enumerate() {
            let cols = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let (mut gx, mut gy) = (0.0f32, 0.0f32);
            for (ky, row) in rows.iter().enumerate() {
                for (kx, &sx) in cols.iter().enumerate() {
                    let v = row[sx] as f32;
                    gx += v * SOBEL_X[ky][kx];
                    gy += v * SOBEL_Y[ky][kx];
                }
            }
            *o = (gx * gx + gy * gy).sqrt();
        }
    }
    mag
}
