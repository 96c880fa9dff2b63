//! Pre-trained Haar cascade description and its window evaluator.
//!
//! A cascade is an ordered list of stages. Each stage sums the votes of its
//! nodes (weak classifiers) and rejects the window when the sum falls below
//! the stage threshold. Each node compares a weighted sum of rectangle
//! aggregates against its threshold, scaled by the window's standard
//! deviation, and votes `left` or `right`.
//!
//! Rectangles are expressed relative to the base detection window
//! (`min_width × min_height`) and scaled by the current search scale at
//! evaluation time. Tilted nodes read the 45° table; their rectangles are
//! rotated rectangles anchored at their top corner.
//!
//! Descriptors decode from the flat numeric layout used by existing trained
//! cascades, see [`CascadeDescriptor::from_flat`].

mod decode;
mod evaluate;

pub use evaluate::{Window, WindowEvaluator, WindowOutcome, WindowStats};

use serde::{Deserialize, Serialize};

/// Weighted rectangle of a Haar-like feature, relative to the base window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HaarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

/// Weak classifier: one Haar-like feature plus its decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadeNode {
    pub tilted: bool,
    pub rects: Vec<HaarRect>,
    pub threshold: f64,
    /// Vote when the normalised feature response is below the threshold.
    pub left: f64,
    /// Vote otherwise.
    pub right: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadeStage {
    pub threshold: f64,
    pub nodes: Vec<CascadeNode>,
}

/// Immutable cascade shared read-only by every window evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadeDescriptor {
    pub min_width: f64,
    pub min_height: f64,
    pub stages: Vec<CascadeStage>,
}

impl CascadeDescriptor {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn node_count(&self) -> usize {
        self.stages.iter().map(|s| s.nodes.len()).sum()
    }

    pub fn has_tilted_nodes(&self) -> bool {
        self.stages
            .iter()
            .flat_map(|s| s.nodes.iter())
            .any(|n| n.tilted)
    }
}
