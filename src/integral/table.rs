//! Prefix-sum tables and their O(1) region queries.

/// Upright summed-area table: entry `(x, y)` holds the sum over every sample
/// with column `<= x` and row `<= y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegralTable {
    pub(crate) w: usize,
    pub(crate) h: usize,
    pub(crate) data: Vec<u64>,
}

impl IntegralTable {
    pub(crate) fn zeros(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u64 {
        self.data[y * self.w + x]
    }

    /// Reads above or left of the table are zero; reads past the right or
    /// bottom edge clamp to the last column/row.
    #[inline]
    fn sample(&self, x: i64, y: i64) -> u64 {
        if x < 0 || y < 0 || self.data.is_empty() {
            return 0;
        }
        let x = (x as usize).min(self.w - 1);
        let y = (y as usize).min(self.h - 1);
        self.data[y * self.w + x]
    }

    /// Sum over the upright rectangle `[x, x + width) × [y, y + height)`.
    #[inline]
    pub fn region_sum(&self, x: i64, y: i64, width: i64, height: i64) -> u64 {
        if width <= 0 || height <= 0 {
            return 0;
        }
        let (x1, y1) = (x + width - 1, y + height - 1);
        let inner = self.sample(x1, y1) + self.sample(x - 1, y - 1);
        let outer = self.sample(x - 1, y1) + self.sample(x1, y - 1);
        inner - outer
    }
}

/// 45° rotated summed-area table.
///
/// Entry `(x, y)` holds the sum over samples `(x', y')` with `y' <= y` and
/// `|x' - x| <= y - y'`: the upward-opening cone with its apex at `(x, y)`,
/// clipped to the image.
///
/// Each row also stores `pad = h` columns on either side of the image. Cones
/// anchored there still reach into the image, and a cone anchored further out
/// never does, so every read with a column outside the image is exact too.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TiltedTable {
    pub(crate) w: usize,
    pub(crate) h: usize,
    pub(crate) pad: usize,
    pub(crate) data: Vec<u64>,
}

impl TiltedTable {
    pub(crate) fn zeros(w: usize, h: usize) -> Self {
        let pad = h;
        let len = if w == 0 || h == 0 { 0 } else { (w + 2 * pad) * h };
        Self {
            w,
            h,
            pad,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stored columns per row, padding included.
    pub(crate) fn span(&self) -> usize {
        self.w + 2 * self.pad
    }

    /// Image columns of row `y`, without the padding.
    pub fn row(&self, y: usize) -> &[u64] {
        let start = y * self.span() + self.pad;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u64 {
        self.data[y * self.span() + self.pad + x]
    }

    /// Rows above the table and columns beyond the padding are zero. Rows
    /// below the table clamp to the last row, which under-counts: the cone
    /// would keep widening over the bottom rows.
    #[inline]
    fn sample(&self, x: i64, y: i64) -> u64 {
        if y < 0 || self.data.is_empty() {
            return 0;
        }
        let sx = x + self.pad as i64;
        if sx < 0 || sx >= self.span() as i64 {
            return 0;
        }
        let y = (y as usize).min(self.h - 1);
        self.data[y * self.span() + sx as usize]
    }

    /// Sum over the rotated rectangle whose top corner is `(x, y)`, extending
    /// `width` pixels down-right and `height` pixels down-left.
    ///
    /// Exact for any rectangle that ends above the last image row, including
    /// ones that hang over the left or right border.
    #[inline]
    pub fn rotated_sum(&self, x: i64, y: i64, width: i64, height: i64) -> i64 {
        if width <= 0 || height <= 0 {
            return 0;
        }
        let bottom = self.sample(x + width - height, y + width + height - 1);
        let top = self.sample(x, y - 1);
        let left = self.sample(x - height, y + height - 1);
        let right = self.sample(x + width, y + width - 1);
        (bottom + top) as i64 - (left + right) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones(w: usize, h: usize) -> IntegralTable {
        let mut t = IntegralTable::zeros(w, h);
        for y in 0..h {
            for x in 0..w {
                t.data[y * w + x] = ((x + 1) * (y + 1)) as u64;
            }
        }
        t
    }

    #[test]
    fn region_sum_counts_pixels_of_constant_image() {
        let t = ones(5, 4);
        assert_eq!(t.region_sum(0, 0, 5, 4), 20);
        assert_eq!(t.region_sum(1, 1, 2, 2), 4);
        assert_eq!(t.region_sum(4, 3, 1, 1), 1);
    }

    #[test]
    fn region_sum_clips_out_of_range_rectangles() {
        let t = ones(5, 4);
        assert_eq!(t.region_sum(3, 2, 10, 10), 4);
        assert_eq!(t.region_sum(-2, -2, 3, 3), 1);
        assert_eq!(t.region_sum(0, 0, 0, 3), 0);
        assert_eq!(t.region_sum(7, 0, 2, 2), 0);
    }

    fn cone_over_ones(w: usize, x: i64, y: i64) -> u64 {
        (0..=y)
            .map(|yy| {
                let reach = y - yy;
                (0..w as i64).filter(|&xx| (xx - x).abs() <= reach).count() as u64
            })
            .sum()
    }

    #[test]
    fn reads_beside_the_image_match_brute_force() {
        let (w, h) = (5usize, 6usize);
        let data = vec![1u8; w * h];
        let img = crate::image::ImageU8::new(w, h, &data).unwrap();
        let t = crate::integral::build_tilted(&img);
        let reach = (w + h + 2) as i64;
        for y in 0..h as i64 {
            for x in -reach..reach {
                assert_eq!(t.sample(x, y), cone_over_ones(w, x, y), "cone at ({x}, {y})");
            }
        }
    }

    #[test]
    fn rotated_rect_over_left_border_is_clipped_exactly() {
        let data = vec![1u8; 5 * 6];
        let img = crate::image::ImageU8::new(5, 6, &data).unwrap();
        let t = crate::integral::build_tilted(&img);
        // Unclipped the rect covers (-1,3), (-1,2), (0,2), (0,1), (1,1), (1,0).
        assert_eq!(t.rotated_sum(1, 0, 1, 3), 4);
    }
}
