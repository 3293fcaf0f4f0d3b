//! Input configuration errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Step size '{name}' must be positive, got {value}")]
    InvalidStep { name: &'static str, value: i32 },

    #[error("Fast step ({fast}) must not be smaller than fine step ({fine})")]
    FastSlowerThanFine { fine: i32, fast: i32 },

    #[error("Failed to read input config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
