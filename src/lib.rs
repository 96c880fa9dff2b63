#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod cascade;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod integral;
pub mod types;

// Collaborators around the detector: tool configs, overlays and the CPU
// reference transforms.
pub mod config;
pub mod draw;
pub mod transforms;

// --- High-level re-exports -------------------------------------------------

// Main entry points: cascade, detector + results.
pub use crate::cascade::CascadeDescriptor;
pub use crate::detector::{detect, CascadeDetector, DetectorParams};
pub use crate::error::{CascadeError, DetectError};
pub use crate::types::{DetectionResult, Rect};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use cascade_detector::prelude::*;
///
/// # fn main() -> Result<(), DetectError> {
/// let (w, h) = (320usize, 240usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// // 24x24 base window, one stage without nodes.
/// let cascade = CascadeDescriptor::from_flat(&[24.0, 24.0, 0.0, 0.0])?;
/// let det = CascadeDetector::new(cascade);
/// let rects = det.detect(&img, &DetectorParams::default())?;
/// println!("{} detection(s)", rects.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageU8, ImageView};
    pub use crate::{CascadeDescriptor, CascadeDetector, DetectError, DetectorParams, Rect};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    // Stage runners.
    pub use crate::cascade::{Window, WindowEvaluator, WindowOutcome, WindowStats};
    pub use crate::detector::{merge_detections, scale_schedule, scan, DisjointSet, ScaleLevel};
    pub use crate::integral::IntegralImages;

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        InputDescriptor, MergeStage, ScaleLevelReport, ScanStage, StageTiming, TimingBreakdown,
    };
}
