use thiserror::Error;

/// Errors raised while configuring the sensing or body layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("invalid sensor configuration: {0}")]
    InvalidSensorConfig(&'static str),
    #[error("action index {index} out of range for {count} actions")]
    ActionOutOfRange { index: usize, count: usize },
}
