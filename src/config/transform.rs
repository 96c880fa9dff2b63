use crate::transforms::{BorderMode, FilterKind, ResizeMethod};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct TransformToolConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub blur: BlurConfig,
    #[serde(default = "enabled")]
    pub sobel: bool,
    #[serde(default = "enabled")]
    pub lbp: bool,
    /// Second image for an absolute difference map.
    #[serde(default)]
    pub diff_with: Option<PathBuf>,
    /// Fixed gain for the difference map; stretched to 255 when absent.
    #[serde(default)]
    pub diff_scale: Option<u8>,
    #[serde(default)]
    pub flip_horizontal: bool,
    #[serde(default)]
    pub flip_vertical: bool,
    #[serde(default)]
    pub crop: Option<CropConfig>,
    #[serde(default)]
    pub resize: Option<ResizeConfig>,
}

/// Region in source pixels; must lie inside the input image.
#[derive(Debug, Deserialize)]
pub struct CropConfig {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Deserialize)]
pub struct ResizeConfig {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub method: ResizeMethod,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    pub enabled: bool,
    pub kernel: FilterKind,
    pub border: BorderMode,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kernel: FilterKind::Gaussian5,
            border: BorderMode::ClampToBorder,
        }
    }
}

fn enabled() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<TransformToolConfig, String> {
    super::read_json(path)
}
