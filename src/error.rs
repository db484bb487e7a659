//! Error types for the environment library
//!
//! The environment itself never fails on `step`; these errors come from the
//! hardened entry points (`try_step`, configuration loading and validation).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid action {action}: expected an index in 0..={max}")]
    InvalidAction { action: usize, max: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
