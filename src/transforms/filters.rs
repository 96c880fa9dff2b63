use serde::{Deserialize, Serialize};

/// A 1D kernel applied along rows and then along columns.
pub trait SeparableFilter {
    /// Taps in left-to-right order; the centre tap sits at `len / 2`.
    fn taps(&self) -> &[f32];

    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_5TAP
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Normalised 3-tap box `[1, 1, 1] / 3`.
pub const BOX_3TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]);

/// Named kernels selectable from JSON configs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    Gaussian5,
    Box3,
}

impl FilterKind {
    pub fn filter(self) -> StaticSeparableFilter {
        match self {
            FilterKind::Gaussian5 => GAUSSIAN_5TAP,
            FilterKind::Box3 => BOX_3TAP,
        }
    }
}
