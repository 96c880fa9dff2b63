use serde::{Deserialize, Serialize};

/// Work done at one level of the scale schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLevelReport {
    pub scale: f64,
    pub block_width: usize,
    pub block_height: usize,
    pub step: usize,
    pub windows: usize,
    pub accepted: usize,
    /// Index `i` counts windows rejected by stage `i`.
    pub stage_rejections: Vec<usize>,
}

impl ScaleLevelReport {
    pub fn rejected(&self) -> usize {
        self.stage_rejections.iter().sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStage {
    pub elapsed_ms: f64,
    pub levels: Vec<ScaleLevelReport>,
    pub windows_total: usize,
    pub truncated: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStage {
    pub raw_count: usize,
    pub merged_count: usize,
    pub elapsed_ms: f64,
}
