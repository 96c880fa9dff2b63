//! Two-pass separable convolution with configurable border handling.
use super::filters::SeparableFilter;
use crate::image::{ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

/// How samples outside the image are read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Repeat the nearest edge sample.
    #[default]
    ClampToBorder,
    /// Treat everything outside the image as 0.
    ClampToZero,
}

/// Convolve an 8-bit image with `filter` horizontally, then vertically.
pub fn convolve_separable<I, F>(image: &I, filter: &F, border: BorderMode) -> ImageF32
where
    I: ImageView<Pixel = u8>,
    F: SeparableFilter + ?Sized,
{
    let src = ImageF32::from_u8(image);
    let (w, h) = (src.w, src.h);
    let mut horiz = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let taps = filter.taps();
    let radius = filter.radius() as isize;

    for y in 0..h {
        let row = src.row(y);
        let dst = horiz.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = x as isize + k as isize - radius;
                acc += tap * sample(row, sx, border);
            }
            *d = acc;
        }
    }

    let mut column = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = horiz.get(x, y);
        }
        for y in 0..h {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sy = y as isize + k as isize - radius;
                acc += tap * sample(&column, sy, border);
            }
            out.set(x, y, acc);
        }
    }
    out
}

#[inline]
fn sample(line: &[f32], idx: isize, border: BorderMode) -> f32 {
    let last = line.len() as isize - 1;
    if (0..=last).contains(&idx) {
        return line[idx as usize];
    }
    match border {
        BorderMode::ClampToBorder => line[idx.clamp(0, last) as usize],
        BorderMode::ClampToZero => 0.0,
    }
}
