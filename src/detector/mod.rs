//! Multi-scale cascade detection.
//!
//! Overview
//! - Builds the standard, squared and tilted integral tables of the input.
//! - Derives a geometric scale schedule from the cascade's base window and
//!   slides the scaled window over the image at every level.
//! - Runs the cascade on each window; accepted windows become raw
//!   detections with `count = 1`.
//! - Groups overlapping raw detections with a disjoint-set forest and
//!   averages each group into one box.
//!
//! Modules
//! - [`params`] – per-call parameters and their validation.
//! - [`scanner`] – scale schedule and sliding-window scan.
//! - [`merge`] – union-find grouping of raw detections.
//! - `pipeline` – the [`CascadeDetector`] facade.

pub mod merge;
pub mod params;
mod pipeline;
pub mod scanner;

pub use merge::{merge_detections, DisjointSet};
pub use params::DetectorParams;
pub use pipeline::{detect, CascadeDetector};
pub use scanner::{scale_schedule, scan, ScaleLevel, ScanOutput};
