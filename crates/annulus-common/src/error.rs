//! Error types shared by the annulus post-processing crates.

use thiserror::Error;

/// Result type alias using FramesError.
pub type FramesResult<T> = Result<T, FramesError>;

/// Errors raised while validating configuration or building field grids.
#[derive(Debug, Error)]
pub enum FramesError {
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Field shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl FramesError {
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        FramesError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}
