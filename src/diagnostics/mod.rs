//! Diagnostics data model returned by
//! [`CascadeDetector::detect_with_diagnostics`](crate::CascadeDetector::detect_with_diagnostics).
//!
//! `DetectionReport` bundles the merged result with a `PipelineTrace`
//! describing the integral build, every scanned scale level (window counts
//! and a per-stage rejection histogram) and the merge.

pub mod pipeline;
pub mod scan;
pub mod timing;

pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace};
pub use scan::{MergeStage, ScaleLevelReport, ScanStage};
pub use timing::{StageTiming, TimingBreakdown};
