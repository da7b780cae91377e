pub mod config;
pub mod domain;
pub mod problem;
pub mod training;

pub use config::TrainingConfig;
pub use domain::{Declaration, Domain, ResponseVariation, Slot};
pub use problem::{Problem, ProblemCategory, ProblemReport, Severity};
pub use training::{NluBlock, Rule, Story, StoryStep, TrainingData};
