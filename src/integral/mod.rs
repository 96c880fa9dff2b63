//! Integral images: standard, squared and 45°-tilted summed-area tables.
//!
//! All three tables are built per detection call from an 8-bit view and
//! dropped with it. Accumulators are `u64`, so squared sums of full-range
//! 8-bit images cannot overflow at any practical resolution.
//!
//! - Standard / squared: per-row running sums followed by a column
//!   accumulation. With the `parallel` feature the row phase runs on rayon,
//!   each worker owning disjoint output rows; the column phase only reads
//!   rows that are already final.
//! - Tilted: the Lienhart recurrence
//!   `T(x,y) = T(x-1,y-1) + T(x+1,y-1) - T(x,y-2) + I(x,y) + I(x,y-1)`,
//!   see [`tilted`].

mod table;
mod tilted;

pub use table::{IntegralTable, TiltedTable};
pub use tilted::build_tilted;

use crate::image::ImageView;

/// The three tables consumed by the window evaluator.
#[derive(Clone, Debug)]
pub struct IntegralImages {
    pub sum: IntegralTable,
    pub squared: IntegralTable,
    pub tilted: TiltedTable,
}

impl IntegralImages {
    pub fn build<I>(image: &I) -> Self
    where
        I: ImageView<Pixel = u8> + Sync,
    {
        let (sum, squared) = build_upright(image);
        let tilted = build_tilted(image);
        Self {
            sum,
            squared,
            tilted,
        }
    }

    pub fn width(&self) -> usize {
        self.sum.width()
    }

    pub fn height(&self) -> usize {
        self.sum.height()
    }
}

/// Standard and squared tables in one sweep over the image.
pub fn build_upright<I>(image: &I) -> (IntegralTable, IntegralTable)
where
    I: ImageView<Pixel = u8> + Sync,
{
    let (w, h) = image.dimensions();
    let mut sum = IntegralTable::zeros(w, h);
    let mut squared = IntegralTable::zeros(w, h);
    if w == 0 || h == 0 {
        return (sum, squared);
    }

    row_prefix_sums(image, &mut sum.data, &mut squared.data);
    accumulate_columns(&mut sum.data, w);
    accumulate_columns(&mut squared.data, w);
    (sum, squared)
}

fn prefix_row(src: &[u8], sum_row: &mut [u64], sq_row: &mut [u64]) {
    let mut run = 0u64;
    let mut run_sq = 0u64;
    for ((&px, s), q) in src.iter().zip(sum_row.iter_mut()).zip(sq_row.iter_mut()) {
        let v = px as u64;
        run += v;
        run_sq += v * v;
        *s = run;
        *q = run_sq;
    }
}

#[cfg(not(feature = "parallel"))]
fn row_prefix_sums<I: ImageView<Pixel = u8>>(image: &I, sum: &mut [u64], squared: &mut [u64]) {
    let w = image.width();
    for (y, (sum_row, sq_row)) in sum.chunks_mut(w).zip(squared.chunks_mut(w)).enumerate() {
        prefix_row(image.row(y), sum_row, sq_row);
    }
}

#[cfg(feature = "parallel")]
fn row_prefix_sums<I>(image: &I, sum: &mut [u64], squared: &mut [u64])
where
    I: ImageView<Pixel = u8> + Sync,
{
    use rayon::prelude::*;

    let w = image.width();
    sum.par_chunks_mut(w)
        .zip(squared.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (sum_row, sq_row))| prefix_row(image.row(y), sum_row, sq_row));
}

fn accumulate_columns(data: &mut [u64], w: usize) {
    let h = data.len() / w;
    for y in 1..h {
        let (done, rest) = data.split_at_mut(y * w);
        let above = &done[(y - 1) * w..];
        for (cur, &prev) in rest[..w].iter_mut().zip(above) {
            *cur += prev;
        }
    }
}
