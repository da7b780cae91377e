pub mod consistency;
pub mod graph;
pub mod model_config;

pub use consistency::ConsistencyChecker;
pub use graph::{GraphValidator, ModelValidator};
pub use model_config::{load_model, ModelConfig, TrainingType, DEFAULT_MODEL_ID};
