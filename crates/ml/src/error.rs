use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MlError {
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("non-finite {0}")]
    NonFinite(&'static str),
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(&'static str),
}
