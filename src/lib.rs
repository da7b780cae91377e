// Botlint - Consistency checking for conversational-assistant projects
// Keeps a snapshot cache of a project's configuration files and validates
// the model configuration behind editor diagnostics.

pub mod error;
pub mod models;
pub mod parser;
pub mod state;
pub mod validator;

pub use error::{ProjectError, ValidationFailure};

// Re-export commonly used types
pub use models::{Problem, ProblemCategory, ProblemReport, Severity};
pub use state::{ProjectCache, ProjectSnapshot, ReloadPolicy, StalenessReport};
pub use validator::{ConsistencyChecker, GraphValidator, ModelValidator};
