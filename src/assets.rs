//! Loading lab configuration and catalogs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use projector_core::{CatalogError, ConfigError, LabConfig, LabSession, SampleCatalog, TutorialCatalog};
use projector_input::{InputConfig, InputDispatcher, InputError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Optional override files. Anything left `None` uses the built-in default.
#[derive(Debug, Clone, Default)]
pub struct AssetPaths {
    pub config: Option<PathBuf>,
    pub tutorials: Option<PathBuf>,
    pub samples: Option<PathBuf>,
    pub input: Option<PathBuf>,
}

/// Everything needed to open a lab session.
#[derive(Debug, Clone)]
pub struct LabAssets {
    pub config: LabConfig,
    pub tutorials: Arc<TutorialCatalog>,
    pub samples: Arc<SampleCatalog>,
    pub input: InputConfig,
}

impl Default for LabAssets {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LabAssets {
    /// Default config, built-in tutorials and samples, arrow-key bindings.
    pub fn builtin() -> Self {
        Self {
            config: LabConfig::default(),
            tutorials: Arc::new(TutorialCatalog::builtin()),
            samples: Arc::new(SampleCatalog::builtin()),
            input: InputConfig::default(),
        }
    }

    pub fn load(paths: &AssetPaths) -> Result<Self, LoadError> {
        let config = match &paths.config {
            Some(path) => {
                log_source("config", path);
                LabConfig::load(path)?
            }
            None => LabConfig::default(),
        };
        let tutorials = match &paths.tutorials {
            Some(path) => {
                log_source("tutorials", path);
                TutorialCatalog::load(path)?
            }
            None => TutorialCatalog::builtin(),
        };
        let samples = match &paths.samples {
            Some(path) => {
                log_source("samples", path);
                SampleCatalog::load(path)?
            }
            None => SampleCatalog::builtin(),
        };
        let input = match &paths.input {
            Some(path) => {
                log_source("input", path);
                InputConfig::load(path)?
            }
            None => InputConfig::default(),
        };

        tracing::info!(
            tutorials = tutorials.len(),
            samples = samples.samples_for(&config.experiment_id).len(),
            "lab assets loaded"
        );

        Ok(Self {
            config,
            tutorials: Arc::new(tutorials),
            samples: Arc::new(samples),
            input,
        })
    }

    pub fn session(&self) -> LabSession {
        LabSession::new(
            self.config.clone(),
            Arc::clone(&self.tutorials),
            Arc::clone(&self.samples),
        )
    }

    pub fn dispatcher(&self) -> InputDispatcher {
        InputDispatcher::new(self.input.clone())
    }
}

fn log_source(kind: &str, path: &Path) {
    tracing::debug!(kind, path = %path.display(), "loading override");
}
