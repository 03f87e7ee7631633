use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("failed to access track file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed track JSON")]
    Json(#[from] serde_json::Error),
    #[error("road side {index} is invalid: {reason}")]
    InvalidSide { index: usize, reason: &'static str },
}
