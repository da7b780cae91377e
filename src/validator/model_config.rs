//! Model Configuration Assembly
//!
//! A `ModelConfig` is a transient value built on demand from the domain,
//! the training configuration, and the training data paths. It is never
//! cached; every consistency check rebuilds it from disk.

use crate::error::ProjectError;
use crate::models::{Domain, TrainingConfig, TrainingData};
use std::path::{Path, PathBuf};

/// Model identifier used for every check.
///
/// Deliberately constant: successive and concurrent checks are not
/// distinguishable by identity, and nothing downstream keys off it.
pub const DEFAULT_MODEL_ID: &str = "1";

/// Which parts of the model a training pass covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingType {
    /// Language understanding only
    Nlu,
    /// Dialogue management only
    Core,
    /// Joint NLU and dialogue training
    Both,
}

impl TrainingType {
    /// Whether NLU components are part of this training
    pub fn covers_nlu(&self) -> bool {
        matches!(self, TrainingType::Nlu | TrainingType::Both)
    }

    /// Whether dialogue components are part of this training
    pub fn covers_core(&self) -> bool {
        matches!(self, TrainingType::Core | TrainingType::Both)
    }

    /// Get display name for training type
    pub fn name(&self) -> &'static str {
        match self {
            TrainingType::Nlu => "nlu",
            TrainingType::Core => "core",
            TrainingType::Both => "both",
        }
    }
}

/// Everything the validator needs about a model in one place
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Parsed and schema-checked domain
    pub domain: Domain,
    /// Training pipeline configuration
    pub config: TrainingConfig,
    /// Scope of the training this configuration describes
    pub training_type: TrainingType,
    /// Merged training data from the training paths
    pub training_data: TrainingData,
    /// Model identifier
    pub model_id: String,
}

/// Assemble a model configuration from already-loaded parts plus the
/// training data found under `training_data_paths`.
pub fn load_model(
    domain: Domain,
    config: TrainingConfig,
    training_type: TrainingType,
    training_data_paths: &[PathBuf],
    model_id: &str,
) -> Result<ModelConfig, ProjectError> {
    let training_data = TrainingData::from_paths(training_data_paths)?;
    Ok(ModelConfig {
        domain,
        config,
        training_type,
        training_data,
        model_id: model_id.to_string(),
    })
}

impl ModelConfig {
    /// Build the model configuration for a project root: domain from
    /// `domain.yml`, config from `config.yml`, training data from `data/`.
    pub fn from_project(root: &Path) -> Result<Self, ProjectError> {
        let domain = Domain::from_path(&root.join("domain.yml"))?;
        let config = TrainingConfig::from_path(&root.join("config.yml"))?;
        load_model(
            domain,
            config,
            TrainingType::Both,
            &[root.join("data")],
            DEFAULT_MODEL_ID,
        )
    }
}
