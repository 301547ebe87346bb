//! Error types for gravsim.

use thiserror::Error;

use crate::simulation::states::BodyId;

#[derive(Debug, Error)]
pub enum GravError {
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    #[error("invalid body at index {index}: {reason}")]
    InvalidBody { index: usize, reason: String },

    #[error("invalid engine settings: {0}")]
    InvalidEngine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GravError>;
