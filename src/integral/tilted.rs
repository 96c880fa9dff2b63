//! Rotated (45°) summed-area table.
//!
//! The Lienhart recurrence reads the up-left, up-right and two-rows-up
//! neighbours. Cones anchored just outside the image still cover image pixels,
//! so treating those neighbours as zero would under-count along the left and
//! right borders. The recurrence therefore runs over rolling rows padded with
//! `h` zero columns on each side: a cone anchored at row `y` reaches at most
//! `y` columns sideways, so the padded border never contributes a non-zero
//! value and the image columns come out exact.
//!
//! Three padded rows roll through the recurrence; each finished row is copied
//! into the table with its padding, so queries beside the image stay exact.
use super::table::TiltedTable;
use crate::image::ImageView;

pub fn build_tilted<I: ImageView<Pixel = u8>>(image: &I) -> TiltedTable {
    let (w, h) = image.dimensions();
    let mut table = TiltedTable::zeros(w, h);
    if w == 0 || h == 0 {
        return table;
    }

    let pad = table.pad;
    let span = table.span();
    let mut two_up = vec![0u64; span];
    let mut one_up = vec![0u64; span];
    let mut current = vec![0u64; span];
    let mut row_above: Option<&[u8]> = None;

    for y in 0..h {
        let row = image.row(y);
        for sx in 0..span {
            let up_left = if sx > 0 { one_up[sx - 1] } else { 0 };
            let up_right = if sx + 1 < span { one_up[sx + 1] } else { 0 };
            let pixel = padded_sample(row, sx, pad);
            let above = row_above.map_or(0, |r| padded_sample(r, sx, pad));
            current[sx] = (up_left + up_right + pixel + above) - two_up[sx];
        }

        table.data[y * span..(y + 1) * span].copy_from_slice(&current);

        // Rotate: (two_up, one_up, current) <- (one_up, current, two_up).
        std::mem::swap(&mut two_up, &mut one_up);
        std::mem::swap(&mut one_up, &mut current);
        row_above = Some(row);
    }
    table
}

#[inline]
fn padded_sample(row: &[u8], sx: usize, pad: usize) -> u64 {
    sx.checked_sub(pad)
        .and_then(|x| row.get(x))
        .map_or(0, |&v| v as u64)
}
