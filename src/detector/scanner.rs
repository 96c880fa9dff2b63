//! Multi-scale sliding-window scan.
//!
//! The window grows geometrically from `initial_scale * scale_factor` until it
//! no longer fits strictly inside the image. At every level the window visits
//! `y ∈ [0, h - block_h)` and `x ∈ [0, w - block_w)` with a stride of
//! `max(1, round(scale * step_size))`.
//!
//! Accepted windows come out in scan order: smallest scale first, then
//! row-major within a scale. With the `parallel` feature the rows of a level
//! are evaluated on rayon and concatenated in row order, so the output is
//! identical to the sequential scan.

use super::params::DetectorParams;
use crate::cascade::{CascadeDescriptor, Window, WindowEvaluator};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::ScaleLevelReport;
use crate::error::{DetectError, Result};
use crate::types::Rect;
use log::{debug, warn};
use std::time::Instant;

/// One level of the scale schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLevel {
    pub scale: f64,
    pub block_width: usize,
    pub block_height: usize,
    pub step: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ScanOutput {
    pub detections: Vec<Rect>,
    pub levels: Vec<ScaleLevelReport>,
    /// The time budget ran out before every level was scanned.
    pub truncated: bool,
}

impl ScanOutput {
    pub fn windows_total(&self) -> usize {
        self.levels.iter().map(|l| l.windows).sum()
    }
}

/// Window sizes and strides for an image of `width × height`.
///
/// Empty when even the first window does not fit. Fails if the first window
/// rounds to zero area, since no later level could be reached safely.
pub fn scale_schedule(
    cascade: &CascadeDescriptor,
    params: &DetectorParams,
    width: usize,
    height: usize,
) -> Result<Vec<ScaleLevel>> {
    let mut levels = Vec::new();
    let mut scale = params.initial_scale * params.scale_factor;
    loop {
        let block_width = (scale * cascade.min_width).round() as usize;
        let block_height = (scale * cascade.min_height).round() as usize;
        if levels.is_empty() && (block_width == 0 || block_height == 0) {
            return Err(DetectError::ZeroAreaWindow {
                width: block_width,
                height: block_height,
                scale,
            });
        }
        if block_width >= width || block_height >= height {
            break;
        }
        let step = ((scale * params.step_size).round() as usize).max(1);
        levels.push(ScaleLevel {
            scale,
            block_width,
            block_height,
            step,
        });
        scale *= params.scale_factor;
    }
    Ok(levels)
}

/// Evaluate every window of every level.
///
/// The optional time budget is checked between levels; the first level is
/// always scanned in full.
pub fn scan(
    evaluator: &WindowEvaluator<'_>,
    levels: &[ScaleLevel],
    width: usize,
    height: usize,
    time_budget_ms: Option<f64>,
) -> Result<ScanOutput> {
    let start = Instant::now();
    let stage_count = evaluator.cascade().stage_count();
    let mut out = ScanOutput::default();

    for (idx, level) in levels.iter().enumerate() {
        if idx > 0 {
            if let Some(budget) = time_budget_ms {
                let elapsed = elapsed_ms(start);
                if elapsed >= budget {
                    warn!(
                        "scan stopped after {idx}/{} scales: {elapsed:.2} ms exceeds budget {budget:.2} ms",
                        levels.len()
                    );
                    out.truncated = true;
                    break;
                }
            }
        }

        let rows = scan_level(evaluator, level, width, height)?;
        let mut report = ScaleLevelReport {
            scale: level.scale,
            block_width: level.block_width,
            block_height: level.block_height,
            step: level.step,
            windows: 0,
            accepted: 0,
            stage_rejections: vec![0; stage_count],
        };
        for row in rows {
            report.windows += row.windows;
            report.accepted += row.detections.len();
            for (total, n) in report.stage_rejections.iter_mut().zip(&row.rejections) {
                *total += n;
            }
            out.detections.extend(row.detections);
        }
        debug!(
            "scale {:.3} block={}x{} step={} windows={} accepted={}",
            level.scale,
            level.block_width,
            level.block_height,
            level.step,
            report.windows,
            report.accepted
        );
        out.levels.push(report);
    }
    Ok(out)
}

/// Accepted windows and rejection counts of one scan row.
struct RowScan {
    detections: Vec<Rect>,
    windows: usize,
    rejections: Vec<usize>,
}

fn scan_row(
    evaluator: &WindowEvaluator<'_>,
    level: &ScaleLevel,
    width: usize,
    y: usize,
) -> Result<RowScan> {
    let mut row = RowScan {
        detections: Vec::new(),
        windows: 0,
        rejections: vec![0; evaluator.cascade().stage_count()],
    };
    for x in (0..width.saturating_sub(level.block_width)).step_by(level.step.max(1)) {
        let window = Window {
            x,
            y,
            width: level.block_width,
            height: level.block_height,
            scale: level.scale,
        };
        let outcome = evaluator.evaluate_traced(&window)?;
        row.windows += 1;
        if outcome.accepted {
            row.detections
                .push(Rect::raw(x, y, level.block_width, level.block_height));
        } else {
            row.rejections[outcome.stages_evaluated - 1] += 1;
        }
    }
    Ok(row)
}

#[cfg(not(feature = "parallel"))]
fn scan_level(
    evaluator: &WindowEvaluator<'_>,
    level: &ScaleLevel,
    width: usize,
    height: usize,
) -> Result<Vec<RowScan>> {
    (0..height.saturating_sub(level.block_height))
        .step_by(level.step.max(1))
        .map(|y| scan_row(evaluator, level, width, y))
        .collect()
}

#[cfg(feature = "parallel")]
fn scan_level(
    evaluator: &WindowEvaluator<'_>,
    level: &ScaleLevel,
    width: usize,
    height: usize,
) -> Result<Vec<RowScan>> {
    use rayon::prelude::*;

    let ys: Vec<usize> = (0..height.saturating_sub(level.block_height))
        .step_by(level.step.max(1))
        .collect();
    ys.into_par_iter()
        .map(|y| scan_row(evaluator, level, width, y))
        .collect()
}
