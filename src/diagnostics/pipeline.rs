use crate::diagnostics::{MergeStage, ScanStage, TimingBreakdown};
use crate::types::DetectionResult;
use serde::Serialize;

/// Result produced by
/// [`CascadeDetector::detect_with_diagnostics`](crate::CascadeDetector::detect_with_diagnostics).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub trace: PipelineTrace,
}

/// Execution trace of one detection call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub integral_ms: f64,
    pub scan: ScanStage,
    pub merge: MergeStage,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub cascade_stages: usize,
    pub cascade_nodes: usize,
    pub base_width: f64,
    pub base_height: f64,
}

impl DetectionReport {
    /// Multi-line human-readable summary, as printed by the demo tools.
    pub fn summary(&self) -> String {
        let input = &self.trace.input;
        let mut out = format!(
            "input {}x{}, cascade {} stages / {} nodes, window {}x{}\n",
            input.width,
            input.height,
            input.cascade_stages,
            input.cascade_nodes,
            input.base_width,
            input.base_height
        );
        for level in &self.trace.scan.levels {
            out.push_str(&format!(
                "  scale {:>6.3} block {:>4}x{:<4} step {:>2}: {:>7} windows, {:>4} accepted, {:>7} rejected\n",
                level.scale,
                level.block_width,
                level.block_height,
                level.step,
                level.windows,
                level.accepted,
                level.rejected()
            ));
        }
        if self.trace.scan.truncated {
            out.push_str("  scan truncated by time budget\n");
        }
        out.push_str(&format!(
            "raw {} -> merged {} in {:.2} ms",
            self.result.raw_count,
            self.result.detections.len(),
            self.result.latency_ms
        ));
        out
    }
}
