//! Model Validation
//!
//! Validates a model configuration against the domain:
//! - The config declares a usable pipeline and policies for the training type
//! - Story and rule steps only use declared intents and actions
//! - NLU training intents are declared in the domain
//! - Response texts only interpolate declared slots
//!
//! Validation is all-or-nothing: the first violation found is returned
//! and no further checks run.

use crate::error::ValidationFailure;
use crate::models::problem::ProblemCategory;
use crate::models::StoryStep;
use crate::validator::model_config::ModelConfig;
use regex::Regex;

/// Actions the dialogue runtime provides without declaration
const DEFAULT_ACTIONS: &[&str] = &[
    "action_listen",
    "action_restart",
    "action_session_start",
    "action_default_fallback",
    "action_deactivate_loop",
    "action_two_stage_fallback",
    "action_back",
    "action_unlikely_intent",
    "action_extract_slots",
];

/// Slot interpolation in response texts: `{slot_name}`
const PLACEHOLDER_PATTERN: &str = r"\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Validates an assembled model configuration.
///
/// The seam for host-injected validators: the consistency checker only
/// depends on this trait, so an embedder can substitute its own
/// implementation.
pub trait ModelValidator: Send + Sync {
    /// Validate a model configuration, returning the first failure found.
    fn validate(&self, model: &ModelConfig) -> Result<(), ValidationFailure>;
}

/// Default validator covering the training-graph schema checks
#[derive(Debug, Default)]
pub struct GraphValidator;

impl GraphValidator {
    /// Create a new graph validator
    pub fn new() -> Self {
        Self
    }

    fn check_config(&self, model: &ModelConfig) -> Result<(), ValidationFailure> {
        let config = &model.config;
        // A recipe supplies defaults, so an explicit pipeline/policy list
        // is only required without one.
        if config.recipe.is_none() {
            if model.training_type.covers_nlu() && !config.has_pipeline() {
                return Err(ValidationFailure::new(
                    "config declares no NLU pipeline and no recipe to supply one",
                    ProblemCategory::InvalidConfig,
                )
                .in_file("config.yml"));
            }
            if model.training_type.covers_core() && !config.has_policies() {
                return Err(ValidationFailure::new(
                    "config declares no dialogue policies and no recipe to supply them",
                    ProblemCategory::InvalidConfig,
                )
                .in_file("config.yml"));
            }
        }
        Ok(())
    }

    fn check_steps(
        &self,
        kind: &str,
        name: &str,
        file: &str,
        steps: &[StoryStep],
        model: &ModelConfig,
    ) -> Result<(), ValidationFailure> {
        let intents = model.domain.intent_names();
        let actions = model.domain.action_names();

        for step in steps {
            if let Some(intent) = &step.intent {
                if !intents.contains(intent.as_str()) {
                    return Err(ValidationFailure::new(
                        format!(
                            "{kind} '{name}' uses intent '{intent}' which is not declared in the domain"
                        ),
                        ProblemCategory::UnknownIntent,
                    )
                    .in_file(file));
                }
            }
            if let Some(action) = &step.action {
                if !actions.contains(action.as_str()) && !DEFAULT_ACTIONS.contains(&action.as_str())
                {
                    return Err(ValidationFailure::new(
                        format!(
                            "{kind} '{name}' uses action '{action}' which is not declared in the domain"
                        ),
                        ProblemCategory::UndeclaredAction,
                    )
                    .in_file(file));
                }
            }
        }
        Ok(())
    }

    fn check_nlu(&self, model: &ModelConfig) -> Result<(), ValidationFailure> {
        let intents = model.domain.intent_names();
        for intent in model.training_data.nlu_intents() {
            if !intents.contains(intent) {
                return Err(ValidationFailure::new(
                    format!(
                        "NLU training data defines intent '{intent}' which is not declared in the domain"
                    ),
                    ProblemCategory::UnknownIntent,
                )
                .in_file("data/nlu.yml"));
            }
        }
        Ok(())
    }

    fn check_responses(&self, model: &ModelConfig) -> Result<(), ValidationFailure> {
        let Ok(placeholder) = Regex::new(PLACEHOLDER_PATTERN) else {
            return Ok(());
        };
        let slots = model.domain.slot_names();

        for (name, variations) in &model.domain.responses {
            for variation in variations {
                let Some(text) = &variation.text else {
                    continue;
                };
                for capture in placeholder.captures_iter(text) {
                    let slot = &capture[1];
                    if !slots.contains(slot) {
                        return Err(ValidationFailure::new(
                            format!(
                                "response '{name}' references slot '{slot}' which is not declared in the domain"
                            ),
                            ProblemCategory::UnresolvedSlot,
                        )
                        .in_file("domain.yml"));
                    }
                }
            }
        }
        Ok(())
    }
}

impl ModelValidator for GraphValidator {
    fn validate(&self, model: &ModelConfig) -> Result<(), ValidationFailure> {
        self.check_config(model)?;
        for story in &model.training_data.stories {
            self.check_steps("story", &story.name, "data/stories.yml", &story.steps, model)?;
        }
        for rule in &model.training_data.rules {
            self.check_steps("rule", &rule.name, "data/rules.yml", &rule.steps, model)?;
        }
        self.check_nlu(model)?;
        self.check_responses(model)?;
        Ok(())
    }
}
