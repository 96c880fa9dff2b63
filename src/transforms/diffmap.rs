//! Per-pixel absolute difference of two equally sized images.
use super::TransformError;
use crate::image::{GrayImageU8, ImageView, ImageViewMut};

/// `|a - b|` per pixel.
pub fn difference_map<A, B>(a: &A, b: &B) -> Result<GrayImageU8, TransformError>
where
    A: ImageView<Pixel = u8>,
    B: ImageView<Pixel = u8>,
{
    difference_map_scaled(a, b, Some(1))
}

/// `|a - b| * scale`, saturated at 255.
///
/// With `scale = None` the map is stretched so the largest difference
/// becomes 255; identical images give an all-zero map.
pub fn difference_map_scaled<A, B>(
    a: &A,
    b: &B,
    scale: Option<u8>,
) -> Result<GrayImageU8, TransformError>
where
    A: ImageView<Pixel = u8>,
    B: ImageView<Pixel = u8>,
{
    if a.dimensions() != b.dimensions() {
        return Err(TransformError::DimensionMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }
    let (w, h) = a.dimensions();
    let mut out = GrayImageU8::zeros(w, h);
    let mut max_diff = 0u8;
    for y in 0..h {
        let dst = out.row_mut(y);
        for ((d, &pa), &pb) in dst.iter_mut().zip(a.row(y)).zip(b.row(y)) {
            *d = pa.abs_diff(pb);
            max_diff = max_diff.max(*d);
        }
    }

    match scale {
        Some(1) => {}
        Some(factor) => {
            for y in 0..h {
                for d in out.row_mut(y) {
                    *d = d.saturating_mul(factor);
                }
            }
        }
        None if max_diff > 0 => {
            let max = max_diff as u32;
            for y in 0..h {
                for d in out.row_mut(y) {
                    *d = ((*d as u32 * 255 + max / 2) / max) as u8;
                }
            }
        }
        None => {}
    }
    Ok(out)
}
