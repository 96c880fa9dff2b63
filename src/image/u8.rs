/// Borrowed 8-bit grayscale view; the detector's pixel-buffer input.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view over `data` (`stride == w`).
    ///
    /// Returns `None` when `data` is shorter than `w * h`.
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Option<Self> {
        Self::with_stride(w, h, w, data)
    }

    /// View with explicit row stride. Requires `stride >= w` and enough data
    /// for the last row.
    pub fn with_stride(w: usize, h: usize, stride: usize, data: &'a [u8]) -> Option<Self> {
        if stride < w {
            return None;
        }
        let needed = if h == 0 { 0 } else { (h - 1) * stride + w };
        (data.len() >= needed).then_some(Self { w, h, stride, data })
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
