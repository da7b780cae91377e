//! Training Pipeline Configuration
//!
//! `config.yml` selects the recipe, NLU pipeline, and dialogue policies.
//! Unknown keys are carried through untouched so a newer config format
//! does not fail to load.

use crate::error::ProjectError;
use crate::parser::{self, Document};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Training pipeline configuration loaded from `config.yml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Recipe selecting defaults for pipeline and policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,

    /// Language the NLU model is trained for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// NLU pipeline components, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Vec<Document>>,

    /// Dialogue policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<Document>>,

    /// Unrecognized keys, passed through
    #[serde(flatten)]
    pub extra: BTreeMap<String, Document>,
}

impl TrainingConfig {
    /// Load a training configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ProjectError> {
        parser::read_typed(path)
    }

    /// Whether at least one pipeline component is configured
    pub fn has_pipeline(&self) -> bool {
        self.pipeline.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Whether at least one policy is configured
    pub fn has_policies(&self) -> bool {
        self.policies.as_ref().is_some_and(|p| !p.is_empty())
    }
}
