//! Error types for kinship.
//!
//! The inference, suggestion and statistics passes are total over their
//! inputs and never return these. Only the outer shell (snapshot and config
//! loading) can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading snapshots or configuration.
#[derive(Debug, Error)]
pub enum KinshipError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("unsupported snapshot format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, KinshipError>;
