//! Errors raised while generating an island.

use thiserror::Error;

/// Errors that can occur during heightmap generation and classification.
///
/// Any error aborts the whole generation run; no partial grid is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Degenerate input: every cell equals {value}, cannot normalize a zero-variance grid")]
    DegenerateInput { value: f32 },
    #[error("Non-finite value at cell ({x}, {y})")]
    NumericAnomaly { x: usize, y: usize },
}

impl GenerationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GenerationError::InvalidArgument(msg.into())
    }
}

/// Fails with `InvalidArgument` unless `size` describes a non-empty grid whose
/// `size * size` cell count is representable. Returns that cell count.
pub(crate) fn check_size(size: usize) -> Result<usize, GenerationError> {
    if size == 0 {
        return Err(GenerationError::invalid("grid size must be greater than 0"));
    }
    size.checked_mul(size)
        .ok_or_else(|| GenerationError::invalid(format!("grid size {} is too large", size)))
}
