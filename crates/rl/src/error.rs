use ml::MlError;
use physics::PhysicsError;
use thiserror::Error;

/// Construction-time failures: bad configuration or mismatched dimensions.
#[derive(Error, Debug)]
pub enum RlError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error(transparent)]
    Model(#[from] MlError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("policy expects {expected} {what}, got {actual}")]
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },
}

/// Why a single training step was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainError {
    #[error("reward signal is not finite: {0}")]
    NonFiniteReward(f32),
    #[error("action {index} out of range for {count} actions")]
    ActionOutOfRange { index: usize, count: usize },
    #[error(transparent)]
    Model(#[from] MlError),
}
