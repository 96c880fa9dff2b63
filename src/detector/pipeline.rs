//! Detector facade tying the integral build, the scan and the merge together.
//!
//! Typical usage:
//! ```no_run
//! use cascade_detector::{CascadeDescriptor, CascadeDetector, DetectorParams};
//! use cascade_detector::image::ImageU8;
//!
//! # fn example(flat: &[f64], gray: ImageU8<'_>) -> Result<(), cascade_detector::DetectError> {
//! let cascade = CascadeDescriptor::from_flat(flat)?;
//! let detector = CascadeDetector::new(cascade);
//! for rect in detector.detect(&gray, &DetectorParams::default())? {
//!     println!("{} hit(s) at ({}, {}) {}x{}", rect.count, rect.x, rect.y, rect.width, rect.height);
//! }
//! # Ok(())
//! # }
//! ```
use super::merge::merge_detections;
use super::params::DetectorParams;
use super::scanner::{scale_schedule, scan, ScanOutput};
use crate::cascade::{CascadeDescriptor, WindowEvaluator};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    DetectionReport, InputDescriptor, MergeStage, PipelineTrace, ScanStage, TimingBreakdown,
};
use crate::error::Result;
use crate::image::ImageView;
use crate::integral::IntegralImages;
use crate::types::{DetectionResult, Rect};
use log::debug;
use std::time::Instant;

/// Multi-scale cascade detector.
///
/// Owns only the immutable cascade; every call builds its own integral
/// tables and takes its parameters explicitly, so one detector can serve
/// concurrent callers through a shared reference.
#[derive(Clone, Debug)]
pub struct CascadeDetector {
    cascade: CascadeDescriptor,
}

/// Raw scan output with its stage timings.
struct RawScan {
    output: ScanOutput,
    integral_ms: f64,
    scan_ms: f64,
}

impl CascadeDetector {
    pub fn new(cascade: CascadeDescriptor) -> Self {
        Self { cascade }
    }

    pub fn cascade(&self) -> &CascadeDescriptor {
        &self.cascade
    }

    /// Detect and merge. Images smaller than the first window give an empty
    /// list.
    pub fn detect<I>(&self, image: &I, params: &DetectorParams) -> Result<Vec<Rect>>
    where
        I: ImageView<Pixel = u8> + Sync,
    {
        let raw = run_scan(&self.cascade, image, params)?;
        Ok(merge_detections(&raw.output.detections, params.regions_overlap))
    }

    /// Accepted windows before merging, in scan order.
    pub fn detect_raw<I>(&self, image: &I, params: &DetectorParams) -> Result<Vec<Rect>>
    where
        I: ImageView<Pixel = u8> + Sync,
    {
        Ok(run_scan(&self.cascade, image, params)?.output.detections)
    }

    /// Detect and return the merged result together with a full trace.
    pub fn detect_with_diagnostics<I>(
        &self,
        image: &I,
        params: &DetectorParams,
    ) -> Result<DetectionReport>
    where
        I: ImageView<Pixel = u8> + Sync,
    {
        let total_start = Instant::now();
        let raw = run_scan(&self.cascade, image, params)?;

        let merge_start = Instant::now();
        let detections = merge_detections(&raw.output.detections, params.regions_overlap);
        let merge_ms = elapsed_ms(merge_start);
        debug!(
            "merge raw={} merged={} in {:.3} ms",
            raw.output.detections.len(),
            detections.len(),
            merge_ms
        );

        let latency_ms = elapsed_ms(total_start);
        let mut timings = TimingBreakdown::with_total(latency_ms);
        timings.push("integral", raw.integral_ms);
        timings.push("scan", raw.scan_ms);
        timings.push("merge", merge_ms);

        let raw_count = raw.output.detections.len();
        let windows_total = raw.output.windows_total();
        let (width, height) = image.dimensions();
        let trace = PipelineTrace {
            input: InputDescriptor {
                width,
                height,
                cascade_stages: self.cascade.stage_count(),
                cascade_nodes: self.cascade.node_count(),
                base_width: self.cascade.min_width,
                base_height: self.cascade.min_height,
            },
            timings,
            integral_ms: raw.integral_ms,
            scan: ScanStage {
                elapsed_ms: raw.scan_ms,
                levels: raw.output.levels,
                windows_total,
                truncated: raw.output.truncated,
            },
            merge: MergeStage {
                raw_count,
                merged_count: detections.len(),
                elapsed_ms: merge_ms,
            },
        };
        Ok(DetectionReport {
            result: DetectionResult {
                detections,
                raw_count,
                latency_ms,
            },
            trace,
        })
    }
}

fn run_scan<I>(cascade: &CascadeDescriptor, image: &I, params: &DetectorParams) -> Result<RawScan>
where
    I: ImageView<Pixel = u8> + Sync,
{
    params.validate()?;
    let (width, height) = image.dimensions();
    debug!(
        "detect start w={} h={} stages={}",
        width,
        height,
        cascade.stage_count()
    );

    let levels = scale_schedule(cascade, params, width, height)?;
    if levels.is_empty() {
        debug!("image smaller than the first window, nothing to scan");
        return Ok(RawScan {
            output: ScanOutput::default(),
            integral_ms: 0.0,
            scan_ms: 0.0,
        });
    }

    let integral_start = Instant::now();
    let tables = IntegralImages::build(image);
    let integral_ms = elapsed_ms(integral_start);

    let scan_start = Instant::now();
    let evaluator = WindowEvaluator::new(cascade, &tables);
    let output = scan(&evaluator, &levels, width, height, params.time_budget_ms)?;
    let scan_ms = elapsed_ms(scan_start);
    debug!(
        "scan levels={} windows={} raw={} integral={:.3} ms scan={:.3} ms",
        output.levels.len(),
        output.windows_total(),
        output.detections.len(),
        integral_ms,
        scan_ms
    );
    Ok(RawScan {
        output,
        integral_ms,
        scan_ms,
    })
}

/// One-shot detection without keeping a [`CascadeDetector`] around.
pub fn detect<I>(image: &I, cascade: &CascadeDescriptor, params: &DetectorParams) -> Result<Vec<Rect>>
where
    I: ImageView<Pixel = u8> + Sync,
{
    let raw = run_scan(cascade, image, params)?;
    Ok(merge_detections(&raw.output.detections, params.regions_overlap))
}
