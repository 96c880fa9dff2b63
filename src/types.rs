use serde::{Deserialize, Serialize};

/// Detection box in original-image pixel coordinates.
///
/// `count` is the number of raw detections represented by the box: 1 for a
/// window accepted by the scanner, the cluster size after merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub count: usize,
    pub width: usize,
    pub height: usize,
    pub x: usize,
    pub y: usize,
}

impl Rect {
    /// A single accepted window.
    pub fn raw(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            count: 1,
            width,
            height,
            x,
            y,
        }
    }

    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub detections: Vec<Rect>,
    pub raw_count: usize,
    pub latency_ms: f64,
}
