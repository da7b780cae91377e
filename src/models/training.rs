//! NLU and Dialogue Training Data
//!
//! Training data lives under the project's `data/` directory and is passed
//! to the model loader as a set of paths. Every YAML file under those
//! paths contributes its `nlu`, `stories`, and `rules` sections; other
//! files are skipped.

use crate::error::ProjectError;
use crate::parser::{self, Document};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One block of NLU training data (an intent with examples, a synonym
/// table, a regex feature, or a lookup table)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NluBlock {
    /// Intent name, when the block holds intent examples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    /// Example utterances, one per line in the source format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,

    /// Non-intent block kinds (synonym, regex, lookup), passed through
    #[serde(flatten)]
    pub extra: BTreeMap<String, Document>,
}

/// One step of a story or rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryStep {
    /// User intent triggering this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    /// Action the assistant takes at this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Other step keys (entities, slot_was_set, checkpoint, active_loop)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Document>,
}

/// A dialogue training story
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Story name
    #[serde(rename = "story")]
    pub name: String,

    /// Steps in conversation order
    #[serde(default)]
    pub steps: Vec<StoryStep>,
}

/// A dialogue rule; same step shape as a story but always applicable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule name
    #[serde(rename = "rule")]
    pub name: String,

    /// Steps in conversation order
    #[serde(default)]
    pub steps: Vec<StoryStep>,

    /// Rule-only keys (condition, conversation_start, wait_for_user_input)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Document>,
}

/// Sections of a single training data file
#[derive(Debug, Default, Deserialize)]
struct TrainingFile {
    #[serde(default)]
    nlu: Vec<NluBlock>,
    #[serde(default)]
    stories: Vec<Story>,
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Training data merged across every file under the training paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingData {
    /// NLU blocks in file order
    pub nlu: Vec<NluBlock>,
    /// Stories in file order
    pub stories: Vec<Story>,
    /// Rules in file order
    pub rules: Vec<Rule>,
    /// Files that contributed data
    pub sources: Vec<PathBuf>,
}

impl TrainingData {
    /// Collect training data from a set of paths.
    ///
    /// Directories are walked recursively; every `.yml`/`.yaml` file is
    /// parsed and merged. A missing path or an unparsable file fails the
    /// whole load.
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self, ProjectError> {
        let mut data = TrainingData::default();
        for path in paths {
            if path.is_dir() {
                let mut files: Vec<PathBuf> = WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file() && is_yaml(e.path()))
                    .map(|e| e.into_path())
                    .collect();
                // Deterministic merge order regardless of directory layout
                files.sort();
                for file in files {
                    data.merge_file(&file)?;
                }
            } else if path.exists() {
                if is_yaml(path) {
                    data.merge_file(path)?;
                }
            } else {
                return Err(ProjectError::NotFound {
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(data)
    }

    /// Intent names used anywhere in the NLU data
    pub fn nlu_intents(&self) -> Vec<&str> {
        self.nlu
            .iter()
            .filter_map(|block| block.intent.as_deref())
            .collect()
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), ProjectError> {
        let Some(document) = parser::read_document(path)? else {
            return Ok(());
        };
        let file: TrainingFile =
            serde_yaml::from_value(document).map_err(|source| ProjectError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let contributed =
            !file.nlu.is_empty() || !file.stories.is_empty() || !file.rules.is_empty();
        self.nlu.extend(file.nlu);
        self.stories.extend(file.stories);
        self.rules.extend(file.rules);
        if contributed {
            self.sources.push(path.to_path_buf());
        }
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext == "yml" || ext == "yaml")
}
