//! CPU reference implementations of the pixel transforms that accompany the
//! detector: separable blurs, Sobel magnitude, local binary patterns, absolute
//! difference maps, and the geometric flips, crops and resizes.
//!
//! All transforms take any [`ImageView`](crate::image::ImageView) and return
//! owned buffers; none of them modifies its input.

mod convolve;
mod diffmap;
mod filters;
mod geometry;
mod lbp;
mod sobel;

pub use convolve::{convolve_separable, BorderMode};
pub use diffmap::{difference_map, difference_map_scaled};
pub use filters::{FilterKind, SeparableFilter, StaticSeparableFilter, BOX_3TAP, GAUSSIAN_5TAP};
pub use geometry::{
    crop, flip_horizontal, flip_vertical, resize, resize_bilinear, resize_nearest, ResizeMethod,
};
pub use lbp::local_binary_pattern;
pub use sobel::sobel_magnitude;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("image sizes differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
    #[error("crop {width}x{height} at ({x}, {y}) exceeds the {image_width}x{image_height} image")]
    CropOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    },
}
