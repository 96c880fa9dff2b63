//! Geometric transforms: mirroring, cropping and resampling.
//!
//! Resampling maps output pixel `x` to source coordinate `x * src_w / dst_w`
//! (corner-aligned).
use super::TransformError;
use crate::image::{GrayImageU8, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMethod {
    Nearest,
    #[default]
    Bilinear,
}

pub fn flip_horizontal<I: ImageView<Pixel = u8>>(image: &I) -> GrayImageU8 {
    let (w, h) = image.dimensions();
    let mut out = GrayImageU8::zeros(w, h);
    for (y, src) in image.rows().enumerate() {
        for (dst, &v) in out.row_mut(y).iter_mut().zip(src.iter().rev()) {
            *dst = v;
        }
    }
    out
}

pub fn flip_vertical<I: ImageView<Pixel = u8>>(image: &I) -> GrayImageU8 {
    let (w, h) = image.dimensions();
    let mut out = GrayImageU8::zeros(w, h);
    for (y, src) in image.rows().enumerate() {
        out.row_mut(h - 1 - y).copy_from_slice(src);
    }
    out
}

/// Copy the `width × height` region whose top-left corner is `(x, y)`.
///
/// The region must lie inside the image; nothing is clipped.
pub fn crop<I: ImageView<Pixel = u8>>(
    image: &I,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> Result<GrayImageU8, TransformError> {
    let fits = |start: usize, len: usize, limit: usize| {
        start.checked_add(len).is_some_and(|end| end <= limit)
    };
    if !fits(x, width, image.width()) || !fits(y, height, image.height()) {
        return Err(TransformError::CropOutOfBounds {
            x,
            y,
            width,
            height,
            image_width: image.width(),
            image_height: image.height(),
        });
    }
    let mut data = Vec::with_capacity(width * height);
    for row in y..y + height {
        data.extend_from_slice(&image.row(row)[x..x + width]);
    }
    Ok(GrayImageU8::new(width, height, data))
}

pub fn resize<I: ImageView<Pixel = u8>>(
    image: &I,
    width: usize,
    height: usize,
    method: ResizeMethod,
) -> GrayImageU8 {
    match method {
        ResizeMethod::Nearest => resize_nearest(image, width, height),
        ResizeMethod::Bilinear => resize_bilinear(image, width, height),
    }
}

/// Nearest-neighbour resampling. An empty source gives a black image of the
/// requested size.
pub fn resize_nearest<I: ImageView<Pixel = u8>>(
    image: &I,
    width: usize,
    height: usize,
) -> GrayImageU8 {
    let (sw, sh) = image.dimensions();
    if (sw, sh) == (width, height) {
        return GrayImageU8::from_view(image);
    }
    let mut out = GrayImageU8::zeros(width, height);
    if image.is_empty() {
        return out;
    }
    for y in 0..height {
        let src = image.row(y * sh / height);
        for x in 0..width {
            out.put(x, y, src[x * sw / width]);
        }
    }
    out
}

/// Bilinear resampling, rounded to the nearest level. The last source
/// row/column is repeated where the 2×2 neighbourhood runs off the image.
pub fn resize_bilinear<I: ImageView<Pixel = u8>>(
    image: &I,
    width: usize,
    height: usize,
) -> GrayImageU8 {
    let (sw, sh) = image.dimensions();
    if (sw, sh) == (width, height) {
        return GrayImageU8::from_view(image);
    }
    let mut out = GrayImageU8::zeros(width, height);
    if image.is_empty() {
        return out;
    }

    let sx = sw as f64 / width as f64;
    let sy = sh as f64 / height as f64;
    // (left column, right column, weight of the right one) per output column.
    let columns: Vec<(usize, usize, f64)> = (0..width)
        .map(|x| {
            let fx = x as f64 * sx;
            let x0 = (fx as usize).min(sw - 1);
            (x0, (x0 + 1).min(sw - 1), fx - x0 as f64)
        })
        .collect();

    for y in 0..height {
        let fy = y as f64 * sy;
        let y0 = (fy as usize).min(sh - 1);
        let wy = fy - y0 as f64;
        let (top, bottom) = (image.row(y0), image.row((y0 + 1).min(sh - 1)));
        let dst = out.row_mut(y);
        for (d, &(x0, x1, wx)) in dst.iter_mut().zip(&columns) {
            let upper = top[x0] as f64 * (1.0 - wx) + top[x1] as f64 * wx;
            let lower = bottom[x0] as f64 * (1.0 - wx) + bottom[x1] as f64 * wx;
            *d = (upper * (1.0 - wy) + lower * wy).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
