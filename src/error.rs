//! Error types returned by the cascade decoder and the detector.

use thiserror::Error;

/// Failure to decode a flat cascade sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CascadeError {
    #[error("cascade truncated while reading {context}: needed {needed} value(s) at offset {offset}, sequence has {len}")]
    Truncated {
        context: &'static str,
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("invalid {what} count {value} at offset {offset}: expected a non-negative integer")]
    InvalidCount {
        what: &'static str,
        value: f64,
        offset: usize,
    },
    #[error("invalid base window {width}x{height}: both sides must be positive")]
    InvalidWindowSize { width: f64, height: f64 },
    #[error("non-finite {context} value {value} at offset {offset}")]
    NonFiniteValue {
        context: &'static str,
        value: f64,
        offset: usize,
    },
}

/// Failure of a `detect()` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectError {
    #[error(transparent)]
    Cascade(#[from] CascadeError),
    #[error("invalid detector parameters: {0}")]
    InvalidParams(String),
    #[error("zero-area detection window {width}x{height} at scale {scale}")]
    ZeroAreaWindow {
        width: usize,
        height: usize,
        scale: f64,
    },
}

pub type Result<T, E = DetectError> = std::result::Result<T, E>;
