//! 8-neighbour local binary patterns.
//!
//! Bit 7 is the top-left neighbour, continuing clockwise (top, top-right,
//! right, bottom-right, bottom, bottom-left) down to bit 0 for the left
//! neighbour. A bit is set when the neighbour is at least as bright as the
//! centre. The one-pixel image border has no full neighbourhood and stays 0.
use crate::image::{GrayImageU8, ImageView, ImageViewMut};

const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

pub fn local_binary_pattern<I: ImageView<Pixel = u8>>(image: &I) -> GrayImageU8 {
    let (w, h) = image.dimensions();
    let mut out = GrayImageU8::zeros(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let rows = [image.row(y - 1), image.row(y), image.row(y + 1)];
        let dst = out.row_mut(y);
        for x in 1..w - 1 {
            let centre = rows[1][x];
            let mut code = 0u8;
            for &(dx, dy) in &NEIGHBOURS {
                let v = rows[(1 + dy) as usize][(x as isize + dx) as usize];
                code = (code << 1) | u8::from(v >= centre);
            }
            dst[x] = code;
        }
    }
    out
}
