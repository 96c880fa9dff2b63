//! Rendering of detection boxes into a single-channel buffer.
//!
//! Every write is clipped to the image, so boxes that extend past the border
//! (or lie fully outside) are safe to draw.
use crate::image::ImageViewMut;
use crate::types::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStyle {
    /// Overwrite every pixel inside the box.
    Fill,
    /// Draw a border `thickness` pixels wide on the inside of the box.
    Outline { thickness: usize },
}

pub fn draw_rects<I>(image: &mut I, rects: &[Rect], value: I::Pixel, style: DrawStyle)
where
    I: ImageViewMut,
{
    for r in rects {
        draw_rect(image, r, value, style);
    }
}

pub fn draw_rect<I>(image: &mut I, rect: &Rect, value: I::Pixel, style: DrawStyle)
where
    I: ImageViewMut,
{
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());
    match style {
        DrawStyle::Fill => {
            for y in y0..y1.min(image.height()) {
                image.fill_span(y, x0, x1, value);
            }
        }
        DrawStyle::Outline { thickness } => {
            let t = thickness.max(1);
            for y in y0..y1.min(image.height()) {
                if y < y0 + t || y + t >= y1 {
                    image.fill_span(y, x0, x1, value);
                } else {
                    image.fill_span(y, x0, (x0 + t).min(x1), value);
                    image.fill_span(y, x1.saturating_sub(t).max(x0), x1, value);
                }
            }
        }
    }
}
