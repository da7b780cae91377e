use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity of a reported problem, mapped to editor annotation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks training; rendered as an error annotation
    Error,
    /// Suspicious but trainable; rendered as a warning annotation
    Warning,
    /// Informational only
    Hint,
}

impl Severity {
    /// Get display symbol for severity
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Error => "🔴",
            Severity::Warning => "🟡",
            Severity::Hint => "🔵",
        }
    }

    /// Get display name for severity
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Hint => "HINT",
        }
    }
}

/// Category of a reported problem, for grouping in the diagnostics view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemCategory {
    /// A required project file is missing or unreadable
    MissingFile,
    /// A file is not a well-formed structured document
    ParseError,
    /// The domain definition violates its schema
    InvalidDomain,
    /// The training configuration violates its schema
    InvalidConfig,
    /// A story or rule uses an action the domain does not declare
    UndeclaredAction,
    /// A story, rule, or NLU block uses an intent the domain does not declare
    UnknownIntent,
    /// A response text references a slot the domain does not declare
    UnresolvedSlot,
}

impl ProblemCategory {
    /// Get display name for category
    pub fn name(&self) -> &'static str {
        match self {
            ProblemCategory::MissingFile => "Missing File",
            ProblemCategory::ParseError => "Parse Error",
            ProblemCategory::InvalidDomain => "Invalid Domain",
            ProblemCategory::InvalidConfig => "Invalid Config",
            ProblemCategory::UndeclaredAction => "Undeclared Action",
            ProblemCategory::UnknownIntent => "Unknown Intent",
            ProblemCategory::UnresolvedSlot => "Unresolved Slot",
        }
    }
}

/// A problem found during a consistency check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Message describing what's wrong
    pub message: String,
    /// File the problem was attributed to, when known
    pub file: Option<PathBuf>,
    /// Severity level
    pub severity: Severity,
    /// Problem category for grouping
    pub category: ProblemCategory,
}

impl Problem {
    /// Create a new problem
    pub fn new(
        message: impl Into<String>,
        file: Option<PathBuf>,
        severity: Severity,
        category: ProblemCategory,
    ) -> Self {
        Self {
            message: message.into(),
            file,
            severity,
            category,
        }
    }

    /// Build a problem from a load or validation error.
    pub fn from_error(error: &crate::error::ProjectError) -> Self {
        Self {
            message: error.to_string(),
            file: error.path().map(PathBuf::from),
            severity: Severity::Error,
            category: error.category(),
        }
    }

    /// Format problem for display
    pub fn format(&self) -> String {
        match &self.file {
            Some(file) => format!(
                "{} [{}] {} - {}",
                self.severity.symbol(),
                self.severity.name(),
                file.display(),
                self.message
            ),
            None => format!(
                "{} [{}] {}",
                self.severity.symbol(),
                self.severity.name(),
                self.message
            ),
        }
    }
}

/// Ordered list of problems produced by a single consistency check.
///
/// Rebuilt on every check and handed to the diagnostics sink; never
/// retained across checks.
#[derive(Debug, Clone, Default)]
pub struct ProblemReport {
    /// File that triggered the check, if the host supplied one
    pub target: Option<PathBuf>,
    /// Problems in the order they were found
    pub problems: Vec<Problem>,
}

impl ProblemReport {
    /// Create an empty report for a target file
    pub fn for_target(target: impl Into<PathBuf>) -> Self {
        Self {
            target: Some(target.into()),
            problems: Vec::new(),
        }
    }

    /// Add a problem to the report
    pub fn push(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    /// Check if the report is clean
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Number of problems found
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Problem messages in order, for the diagnostics sink
    pub fn messages(&self) -> Vec<&str> {
        self.problems.iter().map(|p| p.message.as_str()).collect()
    }

    /// Format all problems for display
    pub fn format(&self) -> String {
        self.problems
            .iter()
            .map(|p| p.format())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
