//! Project State Cache
//!
//! Holds the single current snapshot of a project's on-disk configuration.
//! A reload builds a complete new snapshot and swaps it in atomically;
//! readers hold an immutable `Arc` and can never observe a half-replaced
//! set of fields. The snapshot is only ever replaced wholesale.

use crate::error::ProjectError;
use crate::parser::{self, Document};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Relative paths of the files captured in every snapshot
pub const WATCHED_FILES: &[&str] = &[
    "domain.yml",
    "credentials.yml",
    "endpoints.yml",
    "data/nlu.yml",
    "data/stories.yml",
];

/// How `reload` treats a missing or unparsable watched file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// The first error aborts the reload; the previous snapshot stays
    /// visible. This is the reference behavior.
    #[default]
    Strict,
    /// A failed file loads as an absent field; the reload succeeds with
    /// whatever could be read.
    BestEffort,
}

/// Point-in-time copy of the project's parsed configuration files.
///
/// Each field is the parsed document, or `None` when the file is missing
/// or empty (per the reload policy in effect).
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    /// Conversation domain definition (`domain.yml`)
    pub domain: Option<Document>,
    /// Channel credentials (`credentials.yml`)
    pub credentials: Option<Document>,
    /// Service endpoints (`endpoints.yml`)
    pub endpoints: Option<Document>,
    /// NLU training examples (`data/nlu.yml`)
    pub nlu: Option<Document>,
    /// Dialogue training stories (`data/stories.yml`)
    pub stories: Option<Document>,
    /// When the snapshot was built; `None` only for the initial empty one
    pub loaded_at: Option<DateTime<Utc>>,
    checksums: HashMap<String, String>,
}

impl ProjectSnapshot {
    /// Document for a watched file, by its relative path
    pub fn document(&self, relative: &str) -> Option<&Document> {
        match relative {
            "domain.yml" => self.domain.as_ref(),
            "credentials.yml" => self.credentials.as_ref(),
            "endpoints.yml" => self.endpoints.as_ref(),
            "data/nlu.yml" => self.nlu.as_ref(),
            "data/stories.yml" => self.stories.as_ref(),
            _ => None,
        }
    }

    /// Recorded checksum for a watched file, by its relative path
    pub fn checksum(&self, relative: &str) -> Option<&str> {
        self.checksums.get(relative).map(String::as_str)
    }

    /// Structural equality over the five documents (load time excluded)
    pub fn same_documents(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.credentials == other.credentials
            && self.endpoints == other.endpoints
            && self.nlu == other.nlu
            && self.stories == other.stories
    }

    /// Whether no document is loaded at all
    pub fn is_empty(&self) -> bool {
        self.domain.is_none()
            && self.credentials.is_none()
            && self.endpoints.is_none()
            && self.nlu.is_none()
            && self.stories.is_none()
    }

    fn set(&mut self, relative: &str, document: Option<Document>) {
        match relative {
            "domain.yml" => self.domain = document,
            "credentials.yml" => self.credentials = document,
            "endpoints.yml" => self.endpoints = document,
            "data/nlu.yml" => self.nlu = document,
            "data/stories.yml" => self.stories = document,
            _ => {}
        }
    }
}

/// Staleness of the cached snapshot relative to the files on disk
#[derive(Debug, Clone, Default)]
pub struct StalenessReport {
    /// Files whose on-disk content differs from the snapshot (including
    /// files deleted since the last reload)
    pub stale: Vec<String>,
    /// Files on disk the snapshot has never loaded
    pub never_loaded: Vec<String>,
    /// Files matching the snapshot
    pub up_to_date: Vec<String>,
}

impl StalenessReport {
    /// Whether the snapshot still matches the disk
    pub fn is_fresh(&self) -> bool {
        self.stale.is_empty() && self.never_loaded.is_empty()
    }
}

/// Owns the single current [`ProjectSnapshot`] for a project.
///
/// At most one snapshot exists per cache at any time; consumers read
/// through [`ProjectCache::snapshot`] and must not hold a snapshot across
/// a reload boundary when they need current data.
pub struct ProjectCache {
    root: PathBuf,
    policy: ReloadPolicy,
    snapshot: RwLock<Arc<ProjectSnapshot>>,
}

impl ProjectCache {
    /// Create a cache with the default (strict) reload policy.
    ///
    /// The initial snapshot is empty; call [`ProjectCache::reload`] to
    /// populate it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_policy(root, ReloadPolicy::default())
    }

    /// Create a cache with an explicit reload policy.
    pub fn with_policy(root: impl Into<PathBuf>, policy: ReloadPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
            snapshot: RwLock::new(Arc::new(ProjectSnapshot::default())),
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reload policy in effect
    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    /// Current snapshot. Never blocks beyond the swap and never triggers
    /// a reload.
    pub fn snapshot(&self) -> Arc<ProjectSnapshot> {
        let guard = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Read all watched files and atomically replace the snapshot.
    ///
    /// Under [`ReloadPolicy::Strict`] the first read or parse error aborts
    /// the reload and the previous snapshot stays in place. Under
    /// [`ReloadPolicy::BestEffort`] failed files load as absent fields.
    /// An empty file loads as an absent field under either policy.
    pub fn reload(&self) -> Result<Arc<ProjectSnapshot>, ProjectError> {
        tracing::debug!(project = %self.root.display(), policy = ?self.policy, "reloading project snapshot");
        let next = Arc::new(self.build_snapshot()?);

        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        Ok(next)
    }

    /// Compare on-disk contents against the snapshot's recorded checksums.
    pub fn staleness_report(&self) -> Result<StalenessReport, ProjectError> {
        let snapshot = self.snapshot();
        let mut report = StalenessReport::default();

        for &relative in WATCHED_FILES {
            let path = self.root.join(relative);
            let recorded = snapshot.checksum(relative);
            if !path.exists() {
                // Deleted since the last reload counts as stale
                if recorded.is_some() {
                    report.stale.push(relative.to_string());
                }
                continue;
            }
            let raw = std::fs::read_to_string(&path).map_err(|source| ProjectError::Io {
                path: path.clone(),
                source,
            })?;
            let current = parser::calculate_checksum(&raw);
            match recorded {
                None => report.never_loaded.push(relative.to_string()),
                Some(rec) if rec != current => report.stale.push(relative.to_string()),
                Some(_) => report.up_to_date.push(relative.to_string()),
            }
        }

        Ok(report)
    }

    /// Whether any watched file changed since the last reload.
    pub fn is_stale(&self) -> Result<bool, ProjectError> {
        Ok(!self.staleness_report()?.is_fresh())
    }

    // The snapshot is built completely off-lock; the write lock is held
    // only for the pointer swap in reload().
    fn build_snapshot(&self) -> Result<ProjectSnapshot, ProjectError> {
        let mut snapshot = ProjectSnapshot::default();
        for &relative in WATCHED_FILES {
            let path = self.root.join(relative);
            match load_file(&path) {
                Ok(loaded) => {
                    snapshot.set(relative, loaded.document);
                    snapshot
                        .checksums
                        .insert(relative.to_string(), loaded.checksum);
                }
                Err(err) => match self.policy {
                    ReloadPolicy::Strict => return Err(err),
                    ReloadPolicy::BestEffort => {
                        tracing::warn!(file = relative, error = %err, "loading file failed, field left absent");
                        snapshot.set(relative, None);
                    }
                },
            }
        }
        snapshot.loaded_at = Some(Utc::now());
        Ok(snapshot)
    }
}

struct LoadedFile {
    document: Option<Document>,
    checksum: String,
}

fn load_file(path: &Path) -> Result<LoadedFile, ProjectError> {
    if !path.exists() {
        return Err(ProjectError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parser::parse_document(&raw, path)?;
    Ok(LoadedFile {
        document,
        checksum: parser::calculate_checksum(&raw),
    })
}
