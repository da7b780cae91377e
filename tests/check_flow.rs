//! Integration tests for the reload-then-check flow
//!
//! Drives the crate the way a host runtime would: build a project on
//! disk, reload the state cache on "file change", run the consistency
//! checker on "inspection request", and hand the problem list to a
//! diagnostics sink.

use anyhow::Result;
use botlint::{ConsistencyChecker, ProblemCategory, ProjectCache, ReloadPolicy};
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// A complete weather-bot project with a consistent domain/config/data set
fn create_weather_bot(root: &Path) -> Result<()> {
    write_file(
        root,
        "domain.yml",
        r#"version: "3.1"
intents:
  - greet
  - goodbye
  - ask_weather
entities:
  - city
slots:
  city:
    type: text
    mappings:
      - type: from_entity
        entity: city
responses:
  utter_greet:
    - text: "Hello! Which city are you in?"
  utter_goodbye:
    - text: "Goodbye!"
  utter_weather:
    - text: "Here is the weather for {city}."
actions:
  - action_fetch_weather
"#,
    )?;
    write_file(
        root,
        "config.yml",
        r#"recipe: default.v1
language: en
pipeline:
  - name: WhitespaceTokenizer
  - name: CountVectorsFeaturizer
  - name: DIETClassifier
    epochs: 100
policies:
  - name: MemoizationPolicy
  - name: RulePolicy
"#,
    )?;
    write_file(
        root,
        "credentials.yml",
        "rest:\nsocketio:\n  user_message_evt: user_uttered\n",
    )?;
    write_file(
        root,
        "endpoints.yml",
        "action_endpoint:\n  url: http://localhost:5055/webhook\n",
    )?;
    write_file(
        root,
        "data/nlu.yml",
        r#"version: "3.1"
nlu:
  - intent: greet
    examples: |
      - hi
      - hello there
  - intent: goodbye
    examples: |
      - bye
  - intent: ask_weather
    examples: |
      - what's the weather in [Berlin](city)
"#,
    )?;
    write_file(
        root,
        "data/stories.yml",
        r#"version: "3.1"
stories:
  - story: happy weather path
    steps:
      - intent: greet
      - action: utter_greet
      - intent: ask_weather
      - action: action_fetch_weather
      - action: utter_weather
      - intent: goodbye
      - action: utter_goodbye
"#,
    )?;
    Ok(())
}

#[test]
fn test_consistent_project_produces_no_diagnostics() -> Result<()> {
    let temp = TempDir::new()?;
    create_weather_bot(temp.path())?;

    let cache = ProjectCache::new(temp.path());
    let snapshot = cache.reload()?;
    assert!(snapshot.domain.is_some());
    assert!(snapshot.nlu.is_some());

    let checker = ConsistencyChecker::new(temp.path());
    let report = checker.check(&temp.path().join("domain.yml"));
    assert!(report.is_empty(), "unexpected problems:\n{}", report.format());
    Ok(())
}

#[test]
fn test_undeclared_story_action_is_reported() -> Result<()> {
    let temp = TempDir::new()?;
    create_weather_bot(temp.path())?;
    write_file(
        temp.path(),
        "data/stories.yml",
        r#"stories:
  - story: broken path
    steps:
      - intent: greet
      - action: utter_forecast
"#,
    )?;

    let report = ConsistencyChecker::new(temp.path()).check(&temp.path().join("data/stories.yml"));
    assert_eq!(report.len(), 1);
    assert!(
        report.problems[0].message.contains("utter_forecast"),
        "problem should name the undeclared action: {}",
        report.problems[0].message
    );
    assert_eq!(report.problems[0].category, ProblemCategory::UndeclaredAction);
    Ok(())
}

#[test]
fn test_invalid_config_yaml_is_reported_as_parse_problem() -> Result<()> {
    let temp = TempDir::new()?;
    create_weather_bot(temp.path())?;
    write_file(temp.path(), "config.yml", "pipeline:\n  - name: [broken\n")?;

    let report = ConsistencyChecker::new(temp.path()).check(&temp.path().join("config.yml"));
    assert_eq!(report.len(), 1);
    assert!(report.problems[0].message.contains("parse"));
    assert_eq!(report.problems[0].category, ProblemCategory::ParseError);

    // config.yml is not a watched file, so the cache reload is unaffected
    let cache = ProjectCache::new(temp.path());
    assert!(cache.reload().is_ok());
    Ok(())
}

#[test]
fn test_multiple_violations_still_yield_one_problem() -> Result<()> {
    let temp = TempDir::new()?;
    create_weather_bot(temp.path())?;
    // Three independent violations: unknown story intent, undeclared
    // action, unknown NLU intent
    write_file(
        temp.path(),
        "data/stories.yml",
        r#"stories:
  - story: broken path
    steps:
      - intent: order_pizza
      - action: action_bake_pizza
"#,
    )?;
    write_file(
        temp.path(),
        "data/nlu.yml",
        "nlu:\n  - intent: complain\n    examples: |\n      - this is wrong\n",
    )?;

    let report = ConsistencyChecker::new(temp.path()).check(&temp.path().join("domain.yml"));
    assert_eq!(report.len(), 1, "check is all-or-nothing: exactly one problem");
    Ok(())
}

#[test]
fn test_reload_policies_for_missing_file() -> Result<()> {
    let temp = TempDir::new()?;
    create_weather_bot(temp.path())?;
    std::fs::remove_file(temp.path().join("credentials.yml"))?;

    // Strict: reload fails with an identifiable NotFound
    let strict = ProjectCache::new(temp.path());
    let err = strict.reload().unwrap_err();
    assert!(err.is_not_found());
    assert!(strict.snapshot().is_empty(), "failed reload must not publish anything");

    // Best effort: reload succeeds, the field is absent
    let lenient = ProjectCache::with_policy(temp.path(), ReloadPolicy::BestEffort);
    let snapshot = lenient.reload()?;
    assert!(snapshot.credentials.is_none());
    assert!(snapshot.domain.is_some());
    Ok(())
}

#[test]
fn test_file_change_then_reload_then_recheck() -> Result<()> {
    let temp = TempDir::new()?;
    create_weather_bot(temp.path())?;

    let cache = ProjectCache::new(temp.path());
    let checker = ConsistencyChecker::new(temp.path());

    cache.reload()?;
    assert!(checker.check(&temp.path().join("domain.yml")).is_empty());
    assert!(!cache.is_stale()?);

    // Edit the domain so the story's custom action is no longer declared
    write_file(
        temp.path(),
        "domain.yml",
        r#"intents:
  - greet
  - goodbye
  - ask_weather
slots:
  city:
    type: text
responses:
  utter_greet:
    - text: "Hello!"
  utter_goodbye:
    - text: "Goodbye!"
  utter_weather:
    - text: "Here is the weather for {city}."
"#,
    )?;

    // The cache notices the edit, the host reloads, the next check fails
    assert!(cache.is_stale()?);
    cache.reload()?;
    assert!(!cache.is_stale()?);

    let report = checker.check(&temp.path().join("domain.yml"));
    assert_eq!(report.len(), 1);
    assert!(report.problems[0].message.contains("action_fetch_weather"));
    Ok(())
}
