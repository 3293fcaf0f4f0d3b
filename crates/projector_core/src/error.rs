//! Errors raised while loading configuration and catalogs.
//!
//! These only occur at start-up, before a session exists. Runtime problems
//! inside a session are [`Fault`](crate::Fault)s.

use std::path::PathBuf;
use thiserror::Error;

use crate::tutorial::StepId;

/// Catalog loading / validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Tutorial '{0}' has no steps")]
    EmptyScript(String),

    #[error("Tutorial '{script}' uses reserved step id 0")]
    ReservedStepId { script: String },

    #[error("Tutorial '{script}' repeats step id {id}")]
    DuplicateStepId { script: String, id: StepId },

    #[error("Tutorial '{script}' step {step} jumps to unknown step {target}")]
    UnknownJumpTarget {
        script: String,
        step: StepId,
        target: StepId,
    },

    #[error("Tutorial '{0}' is defined twice")]
    DuplicateScript(String),

    #[error("Experiment '{experiment}' lists sample '{id}' twice")]
    DuplicateSample { experiment: String, id: String },
}

/// Lab configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Alignment tolerance must be positive, got {0}")]
    InvalidTolerance(i32),
}
