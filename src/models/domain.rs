//! Conversation Domain Definition
//!
//! The domain (`domain.yml`) declares everything the assistant knows:
//! intents, entities, slots, responses, custom actions, and forms.
//! Loading performs the structural checks the deserializer cannot
//! express (duplicate declarations, response naming).

use crate::error::{ProjectError, ValidationFailure};
use crate::models::problem::ProblemCategory;
use crate::parser::{self, Document};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Required prefix for response names; the dialogue runtime resolves
/// `utter_*` actions against the response table.
pub const RESPONSE_PREFIX: &str = "utter_";

/// Declarative definition of a conversational agent's intents, entities,
/// slots, responses, actions, and forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Format version of the domain file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Intents the NLU model can predict
    #[serde(default)]
    pub intents: Vec<Declaration>,

    /// Entities extracted from user messages
    #[serde(default)]
    pub entities: Vec<Declaration>,

    /// Slots holding conversation state, keyed by name
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,

    /// Response templates, keyed by `utter_*` name
    #[serde(default)]
    pub responses: BTreeMap<String, Vec<ResponseVariation>>,

    /// Custom action names
    #[serde(default)]
    pub actions: Vec<String>,

    /// Forms, keyed by name (slot mapping config is passed through)
    #[serde(default)]
    pub forms: BTreeMap<String, Document>,

    /// Session behavior config, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_config: Option<Document>,
}

/// A bare name or a name with attached configuration.
///
/// Intent and entity lists accept both YAML shapes:
/// `- greet` and `- greet: {use_entities: []}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Declaration {
    Name(String),
    WithConfig(BTreeMap<String, Document>),
}

impl Declaration {
    /// Declared name; for the map shape, the single top-level key.
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Name(name) => Some(name),
            Declaration::WithConfig(map) => map.keys().next().map(String::as_str),
        }
    }
}

/// A slot definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot type (text, bool, categorical, float, list, any)
    #[serde(rename = "type")]
    pub slot_type: String,

    /// Whether the slot value steers dialogue predictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence_conversation: Option<bool>,

    /// Value the slot starts a session with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Document>,

    /// How the slot is filled (passed through untouched)
    #[serde(default)]
    pub mappings: Vec<Document>,
}

/// One variation of a response template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseVariation {
    /// Message text; may interpolate slots with `{slot_name}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Other channels and payloads (image, buttons, custom, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Document>,
}

impl Domain {
    /// Load and schema-check a domain file.
    pub fn from_path(path: &Path) -> Result<Self, ProjectError> {
        let domain: Domain = parser::read_typed(path)?;
        domain.ensure_valid(path)?;
        Ok(domain)
    }

    /// Structural checks the deserializer cannot express.
    fn ensure_valid(&self, path: &Path) -> Result<(), ProjectError> {
        let mut seen = HashSet::new();
        for intent in &self.intents {
            let Some(name) = intent.name() else {
                return Err(ValidationFailure::new(
                    "intent declaration with no name",
                    ProblemCategory::InvalidDomain,
                )
                .in_file(path)
                .into());
            };
            if !seen.insert(name.to_string()) {
                return Err(ValidationFailure::new(
                    format!("intent '{name}' is declared more than once"),
                    ProblemCategory::InvalidDomain,
                )
                .in_file(path)
                .into());
            }
        }

        for response in self.responses.keys() {
            if !response.starts_with(RESPONSE_PREFIX) {
                return Err(ValidationFailure::new(
                    format!("response '{response}' must start with '{RESPONSE_PREFIX}'"),
                    ProblemCategory::InvalidDomain,
                )
                .in_file(path)
                .into());
            }
        }

        Ok(())
    }

    /// Names of all declared intents
    pub fn intent_names(&self) -> HashSet<&str> {
        self.intents.iter().filter_map(|i| i.name()).collect()
    }

    /// Names of all declared slots
    pub fn slot_names(&self) -> HashSet<&str> {
        self.slots.keys().map(String::as_str).collect()
    }

    /// Everything a story step may invoke as an action: declared custom
    /// actions, response names, and form names.
    pub fn action_names(&self) -> HashSet<&str> {
        self.actions
            .iter()
            .map(String::as_str)
            .chain(self.responses.keys().map(String::as_str))
            .chain(self.forms.keys().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_DOMAIN: &str = r#"version: "3.1"

intents:
  - greet
  - goodbye
  - inform:
      use_entities:
        - city

entities:
  - city

slots:
  city:
    type: text
    influence_conversation: true
    mappings:
      - type: from_entity
        entity: city

responses:
  utter_greet:
    - text: "Hello! Which city are you in?"
  utter_weather:
    - text: "The weather in {city} looks fine."

actions:
  - action_fetch_weather

forms:
  weather_form:
    required_slots:
      - city
"#;

    fn write_domain(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("domain.yml");
        std::fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn test_parse_full_domain() {
        let (_temp, path) = write_domain(SAMPLE_DOMAIN);
        let domain = Domain::from_path(&path).unwrap();

        assert_eq!(domain.version.as_deref(), Some("3.1"));
        assert!(domain.intent_names().contains("greet"));
        assert!(domain.intent_names().contains("inform"));
        assert!(domain.slot_names().contains("city"));
        assert_eq!(domain.responses["utter_weather"].len(), 1);
    }

    #[test]
    fn test_action_names_include_responses_and_forms() {
        let (_temp, path) = write_domain(SAMPLE_DOMAIN);
        let domain = Domain::from_path(&path).unwrap();
        let actions = domain.action_names();

        assert!(actions.contains("action_fetch_weather"));
        assert!(actions.contains("utter_greet"));
        assert!(actions.contains("weather_form"));
        assert!(!actions.contains("action_unknown"));
    }

    #[test]
    fn test_missing_domain_file() {
        let temp = TempDir::new().unwrap();
        let err = Domain::from_path(&temp.path().join("domain.yml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_intent_rejected() {
        let (_temp, path) = write_domain("intents:\n  - greet\n  - greet\n");
        let err = Domain::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("more than once"));
        assert_eq!(err.category(), ProblemCategory::InvalidDomain);
    }

    #[test]
    fn test_response_prefix_enforced() {
        let (_temp, path) = write_domain("responses:\n  greet:\n    - text: hi\n");
        let err = Domain::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("utter_"));
    }

    #[test]
    fn test_declaration_name_for_both_shapes() {
        let bare = Declaration::Name("greet".to_string());
        assert_eq!(bare.name(), Some("greet"));

        let mut map = BTreeMap::new();
        map.insert("inform".to_string(), Document::Null);
        let with_config = Declaration::WithConfig(map);
        assert_eq!(with_config.name(), Some("inform"));
    }
}
