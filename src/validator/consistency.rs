//! Project Consistency Checking
//!
//! Rebuilds the model configuration from disk and validates it, mapping
//! any failure into a reported problem. Errors never escape a check;
//! the host receives a problem list or a clean report, nothing else.

use crate::models::{Problem, ProblemReport};
use crate::validator::graph::{GraphValidator, ModelValidator};
use crate::validator::model_config::ModelConfig;
use std::path::{Path, PathBuf};

/// Runs consistency checks for a project.
///
/// The checker holds no project state of its own; every check rebuilds
/// the model configuration from the files on disk.
pub struct ConsistencyChecker {
    root: PathBuf,
    validator: Box<dyn ModelValidator>,
}

impl ConsistencyChecker {
    /// Create a checker with the default [`GraphValidator`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_validator(root, Box::new(GraphValidator::new()))
    }

    /// Create a checker with a host-supplied validator.
    pub fn with_validator(root: impl Into<PathBuf>, validator: Box<dyn ModelValidator>) -> Self {
        Self {
            root: root.into(),
            validator,
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a consistency check.
    ///
    /// The target file is recorded on the report, but validation always
    /// covers the whole project: the model configuration is
    /// project-granular, so which file triggered the request does not
    /// matter.
    ///
    /// The check is all-or-nothing: the report is either empty or carries
    /// exactly one problem describing the first failure encountered.
    pub fn check(&self, target: &Path) -> ProblemReport {
        tracing::debug!(project = %self.root.display(), file = %target.display(), "running consistency check");
        let mut report = ProblemReport::for_target(target);
        if let Err(err) = self.load_and_validate() {
            tracing::debug!(error = %err, "consistency check found a problem");
            report.push(Problem::from_error(&err));
        }
        report
    }

    fn load_and_validate(&self) -> Result<(), crate::error::ProjectError> {
        let model = ModelConfig::from_project(&self.root)?;
        self.validator.validate(&model)?;
        Ok(())
    }
}
