//! Typed errors for project loading and validation.
//!
//! The reference behavior funneled every failure through a catch-all; here
//! each loader returns a `Result` and the consistency checker maps the
//! error variant into a reported problem.

use crate::models::problem::ProblemCategory;
use std::path::{Path, PathBuf};

/// Errors raised while loading or validating project configuration.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// A required file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed as a structured document.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The model configuration failed a schema or consistency check.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl ProjectError {
    /// Whether this error identifies a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProjectError::NotFound { .. })
    }

    /// File the error refers to, when known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ProjectError::NotFound { path }
            | ProjectError::Io { path, .. }
            | ProjectError::Parse { path, .. } => Some(path),
            ProjectError::Validation(failure) => failure.file.as_deref(),
        }
    }

    /// Problem category this error maps to when reported as a diagnostic.
    pub fn category(&self) -> ProblemCategory {
        match self {
            ProjectError::NotFound { .. } | ProjectError::Io { .. } => ProblemCategory::MissingFile,
            ProjectError::Parse { .. } => ProblemCategory::ParseError,
            ProjectError::Validation(failure) => failure.category,
        }
    }
}

/// A single failure raised by the model validator.
///
/// Carries the first violation encountered; validation is all-or-nothing,
/// so one failure aborts the whole check.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ValidationFailure {
    /// Human-readable description of the violation.
    pub message: String,
    /// File the violation was attributed to, when known.
    pub file: Option<PathBuf>,
    /// Category for diagnostic grouping.
    pub category: ProblemCategory,
}

impl ValidationFailure {
    /// Create a new failure with no file attribution.
    pub fn new(message: impl Into<String>, category: ProblemCategory) -> Self {
        Self {
            message: message.into(),
            file: None,
            category,
        }
    }

    /// Attribute the failure to a file.
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_identification() {
        let err = ProjectError::NotFound {
            path: PathBuf::from("domain.yml"),
        };
        assert!(err.is_not_found());
        assert_eq!(err.category(), ProblemCategory::MissingFile);
        assert!(err.to_string().contains("domain.yml"));
    }

    #[test]
    fn test_validation_failure_carries_category() {
        let failure = ValidationFailure::new("bad action", ProblemCategory::UndeclaredAction)
            .in_file("data/stories.yml");
        let err: ProjectError = failure.into();
        assert_eq!(err.category(), ProblemCategory::UndeclaredAction);
        assert_eq!(err.path().unwrap().to_str(), Some("data/stories.yml"));
    }
}
