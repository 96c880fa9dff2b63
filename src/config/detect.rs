use crate::detector::DetectorParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DetectToolConfig {
    pub input: PathBuf,
    /// Cascade file, see [`load_cascade`](super::load_cascade).
    pub cascade: PathBuf,
    #[serde(default)]
    pub detector: DetectorParams,
    #[serde(default)]
    pub output: DetectOutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetectOutputConfig {
    pub json_out: Option<PathBuf>,
    /// Grayscale copy of the input with detections outlined.
    pub overlay_image: Option<PathBuf>,
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

pub fn load_config(path: &Path) -> Result<DetectToolConfig, String> {
    let config: DetectToolConfig = super::read_json(path)?;
    config
        .detector
        .validate()
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    Ok(config)
}
