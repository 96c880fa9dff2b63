//! Cascade evaluation of a single detection window.
//!
//! The window's mean and variance come from the standard and squared tables
//! in O(1). Node responses are normalised by the window area and compared
//! against `threshold * std_dev`, which makes the cascade invariant to
//! uniform contrast changes. A flat window (non-positive variance) uses a
//! standard deviation of exactly 1.
//!
//! Stages run strictly in descriptor order and the first failing stage ends
//! the evaluation.
use super::{CascadeDescriptor, CascadeNode};
use crate::error::{DetectError, Result};
use crate::integral::IntegralImages;

/// Detection window at a given search scale, in image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

/// Result of running the cascade on one window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowOutcome {
    pub accepted: bool,
    /// Stages entered, including the rejecting one.
    pub stages_evaluated: usize,
}

/// Evaluates windows against a cascade over one image's integral tables.
///
/// Holds shared borrows only, so a single evaluator can be used from many
/// threads at once.
#[derive(Clone, Copy)]
pub struct WindowEvaluator<'a> {
    cascade: &'a CascadeDescriptor,
    tables: &'a IntegralImages,
}

impl<'a> WindowEvaluator<'a> {
    pub fn new(cascade: &'a CascadeDescriptor, tables: &'a IntegralImages) -> Self {
        Self { cascade, tables }
    }

    pub fn cascade(&self) -> &'a CascadeDescriptor {
        self.cascade
    }

    pub fn window_stats(&self, window: &Window) -> Result<WindowStats> {
        let inverse_area = inverse_area(window)?;
        Ok(self.stats(window, inverse_area))
    }

    pub fn evaluate(&self, window: &Window) -> Result<bool> {
        Ok(self.evaluate_traced(window)?.accepted)
    }

    pub fn evaluate_traced(&self, window: &Window) -> Result<WindowOutcome> {
        let inverse_area = inverse_area(window)?;
        let stats = self.stats(window, inverse_area);

        for (idx, stage) in self.cascade.stages.iter().enumerate() {
            let mut stage_sum = 0.0f64;
            for node in &stage.nodes {
                let response = self.node_response(node, window) * inverse_area;
                stage_sum += if response < node.threshold * stats.std_dev {
                    node.left
                } else {
                    node.right
                };
            }
            if stage_sum < stage.threshold {
                return Ok(WindowOutcome {
                    accepted: false,
                    stages_evaluated: idx + 1,
                });
            }
        }

        Ok(WindowOutcome {
            accepted: true,
            stages_evaluated: self.cascade.stages.len(),
        })
    }

    fn stats(&self, window: &Window, inverse_area: f64) -> WindowStats {
        let (x, y) = (window.x as i64, window.y as i64);
        let (w, h) = (window.width as i64, window.height as i64);
        let sum = self.tables.sum.region_sum(x, y, w, h) as f64;
        let squared = self.tables.squared.region_sum(x, y, w, h) as f64;

        let mean = sum * inverse_area;
        let variance = squared * inverse_area - mean * mean;
        let std_dev = if variance > 0.0 { variance.sqrt() } else { 1.0 };
        WindowStats {
            mean,
            variance,
            std_dev,
        }
    }

    /// Weighted sum of the node's rectangle aggregates, unnormalised.
    fn node_response(&self, node: &CascadeNode, window: &Window) -> f64 {
        let (ox, oy, scale) = (window.x as i64, window.y as i64, window.scale);
        node.rects
            .iter()
            .map(|r| {
                let left = ox + scaled(r.x, scale);
                let top = oy + scaled(r.y, scale);
                let width = scaled(r.width, scale);
                let height = scaled(r.height, scale);
                let sum = if node.tilted {
                    self.tables.tilted.rotated_sum(left, top, width, height) as f64
                } else {
                    self.tables.sum.region_sum(left, top, width, height) as f64
                };
                sum * r.weight
            })
            .sum()
    }
}

/// `round(value * scale)` with halves rounding up.
#[inline]
fn scaled(value: f64, scale: f64) -> i64 {
    (value * scale + 0.5).floor() as i64
}

fn inverse_area(window: &Window) -> Result<f64> {
    let area = window.width * window.height;
    if area == 0 {
        return Err(DetectError::ZeroAreaWindow {
            width: window.width,
            height: window.height,
            scale: window.scale,
        });
    }
    Ok(1.0 / area as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::{CascadeStage, HaarRect};
    use crate::image::ImageU8;

    fn full_window_node(threshold: f64, left: f64, right: f64) -> CascadeNode {
        CascadeNode {
            tilted: false,
            rects: vec![HaarRect {
                x: 0.0,
                y: 0.0,
                width: 4.0,
                height: 4.0,
                weight: 1.0,
            }],
            threshold,
            left,
            right,
        }
    }

    fn cascade(stages: Vec<CascadeStage>) -> CascadeDescriptor {
        CascadeDescriptor {
            min_width: 4.0,
            min_height: 4.0,
            stages,
        }
    }

    fn window(x: usize, y: usize) -> Window {
        Window {
            x,
            y,
            width: 4,
            height: 4,
            scale: 1.0,
        }
    }

    #[test]
    fn flat_window_uses_unit_standard_deviation() {
        let data = vec![50u8; 64];
        let img = ImageU8::new(8, 8, &data).unwrap();
        let tables = IntegralImages::build(&img);
        let c = cascade(Vec::new());
        let stats = WindowEvaluator::new(&c, &tables)
            .window_stats(&window(2, 2))
            .unwrap();
        assert_eq!(stats.mean, 50.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 1.0);
    }

    #[test]
    fn window_stats_of_two_level_window() {
        // Left half 0, right half 100: mean 50, variance 2500.
        let data: Vec<u8> = (0..64).map(|i| if i % 8 < 4 { 0 } else { 100 }).collect();
        let img = ImageU8::new(8, 8, &data).unwrap();
        let tables = IntegralImages::build(&img);
        let c = cascade(Vec::new());
        let stats = WindowEvaluator::new(&c, &tables)
            .window_stats(&window(2, 0))
            .unwrap();
        assert!((stats.mean - 50.0).abs() < 1e-9);
        assert!((stats.variance - 2500.0).abs() < 1e-6);
        assert!((stats.std_dev - 50.0).abs() < 1e-9);
    }

    #[test]
    fn early_stage_rejection_skips_later_stages() {
        let data = vec![10u8; 64];
        let img = ImageU8::new(8, 8, &data).unwrap();
        let tables = IntegralImages::build(&img);
        // Mean response 10 < 1000 * 1 => left vote of -1 fails stage 0, while
        // stage 1 would accept any window.
        let c = cascade(vec![
            CascadeStage {
                threshold: 0.0,
                nodes: vec![full_window_node(1000.0, -1.0, 1.0)],
            },
            CascadeStage {
                threshold: -10.0,
                nodes: vec![full_window_node(0.0, 1.0, 1.0)],
            },
        ]);
        let outcome = WindowEvaluator::new(&c, &tables)
            .evaluate_traced(&window(0, 0))
            .unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.stages_evaluated, 1);
    }

    #[test]
    fn passing_every_stage_accepts() {
        let data = vec![10u8; 64];
        let img = ImageU8::new(8, 8, &data).unwrap();
        let tables = IntegralImages::build(&img);
        let c = cascade(vec![
            CascadeStage {
                threshold: 0.5,
                nodes: vec![full_window_node(5.0, -1.0, 1.0)],
            },
            CascadeStage {
                threshold: 0.5,
                nodes: vec![full_window_node(5.0, -1.0, 1.0)],
            },
        ]);
        let outcome = WindowEvaluator::new(&c, &tables)
            .evaluate_traced(&window(1, 1))
            .unwrap();
        assert_eq!(
            outcome,
            WindowOutcome {
                accepted: true,
                stages_evaluated: 2
            }
        );
    }

    #[test]
    fn rect_offsets_follow_continuous_scale() {
        // A single bright pixel at (3, 3). A 1x1 rect at (2, 2) scaled by 1.5
        // becomes the 2x2 rect at (3, 3); a truncated integer scale of 1
        // would read the dark pixel at (2, 2) instead.
        let mut data = vec![0u8; 64];
        data[3 * 8 + 3] = 200;
        let img = ImageU8::new(8, 8, &data).unwrap();
        let tables = IntegralImages::build(&img);
        let c = cascade(vec![CascadeStage {
            threshold: 0.0,
            nodes: vec![CascadeNode {
                tilted: false,
                rects: vec![HaarRect {
                    x: 2.0,
                    y: 2.0,
                    width: 1.0,
                    height: 1.0,
                    weight: 1.0,
                }],
                threshold: 0.0,
                left: -1.0,
                right: 1.0,
            }],
        }]);
        let evaluator = WindowEvaluator::new(&c, &tables);
        let scaled_window = Window {
            x: 0,
            y: 0,
            width: 6,
            height: 6,
            scale: 1.5,
        };
        let lit = evaluator.node_response(&c.stages[0].nodes[0], &scaled_window);
        assert_eq!(lit, 200.0);
    }

    #[test]
    fn zero_area_window_is_an_error() {
        let data = vec![0u8; 16];
        let img = ImageU8::new(4, 4, &data).unwrap();
        let tables = IntegralImages::build(&img);
        let c = cascade(Vec::new());
        let err = WindowEvaluator::new(&c, &tables)
            .evaluate(&Window {
                x: 0,
                y: 0,
                width: 0,
                height: 4,
                scale: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, DetectError::ZeroAreaWindow { .. }));
    }
}
