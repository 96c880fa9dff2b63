//! Parameters of a single detection call.
//!
//! The detector holds no configuration of its own: callers pass a
//! [`DetectorParams`] value to every call. Defaults exist so that JSON
//! configs can omit fields; the scanning logic never falls back to them.

use crate::error::{DetectError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Scale applied before the first multiplication by `scale_factor`.
    pub initial_scale: f64,
    /// Geometric growth of the window between levels (> 1).
    pub scale_factor: f64,
    /// Window step at scale 1, in pixels (> 0).
    pub step_size: f64,
    /// Minimum overlap ratio, per box, for two detections to merge. In (0, 1].
    pub regions_overlap: f64,
    /// Stop scanning new scales once this much time has passed.
    pub time_budget_ms: Option<f64>,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            initial_scale: 1.0,
            scale_factor: 1.25,
            step_size: 1.5,
            regions_overlap: 0.5,
            time_budget_ms: None,
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_scale.is_finite() && self.initial_scale > 0.0) {
            return Err(DetectError::InvalidParams(format!(
                "initial_scale must be positive, got {}",
                self.initial_scale
            )));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 1.0) {
            return Err(DetectError::InvalidParams(format!(
                "scale_factor must be greater than 1, got {}",
                self.scale_factor
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(DetectError::InvalidParams(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.regions_overlap > 0.0 && self.regions_overlap <= 1.0) {
            return Err(DetectError::InvalidParams(format!(
                "regions_overlap must lie in (0, 1], got {}",
                self.regions_overlap
            )));
        }
        if let Some(budget) = self.time_budget_ms {
            if budget.is_nan() || budget < 0.0 {
                return Err(DetectError::InvalidParams(format!(
                    "time_budget_ms must be non-negative, got {budget}"
                )));
            }
        }
        Ok(())
    }

    pub fn with_initial_scale(mut self, initial_scale: f64) -> Self {
        self.initial_scale = initial_scale;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_regions_overlap(mut self, regions_overlap: f64) -> Self {
        self.regions_overlap = regions_overlap;
        self
    }

    pub fn with_time_budget_ms(mut self, budget: Option<f64>) -> Self {
        self.time_budget_ms = budget;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        DetectorParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = DetectorParams::default();
        for params in [
            base.clone().with_scale_factor(1.0),
            base.clone().with_step_size(0.0),
            base.clone().with_regions_overlap(0.0),
            base.clone().with_regions_overlap(1.5),
            base.clone().with_initial_scale(-1.0),
            base.clone().with_time_budget_ms(Some(-5.0)),
        ] {
            assert!(
                matches!(params.validate(), Err(DetectError::InvalidParams(_))),
                "{params:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let params: DetectorParams = serde_json::from_str(r#"{ "step_size": 2.0 }"#).unwrap();
        assert_eq!(params.step_size, 2.0);
        assert_eq!(params.scale_factor, 1.25);
        assert_eq!(params.time_budget_ms, None);
    }
}
