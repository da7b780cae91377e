//! YAML Document Plumbing
//!
//! Shared loading for project configuration files:
//! - BOM (Byte Order Mark) stripping
//! - Line ending normalization (CRLF → LF)
//! - Empty files load as absent documents, matching the watched-file
//!   contract (a missing or empty file is an absent snapshot field)

use crate::error::ProjectError;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::path::Path;

/// A parsed configuration file represented as nested key-value/list data.
pub type Document = serde_yaml::Value;

/// Normalize content: strip BOM, normalize line endings
pub fn normalize_content(content: &str) -> String {
    let mut s = content.to_string();

    // Strip UTF-8 BOM if present (U+FEFF at start)
    if let Some(stripped) = s.strip_prefix('\u{FEFF}') {
        s = stripped.to_string();
    }

    // Normalize line endings: CRLF -> LF, CR -> LF
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    s
}

/// Read and parse a YAML file as a generic structured document.
///
/// Returns `Ok(None)` for an empty (or all-whitespace) file; a missing
/// file is an error, never silently absent.
pub fn read_document(path: &Path) -> Result<Option<Document>, ProjectError> {
    if !path.exists() {
        return Err(ProjectError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&raw, path)
}

/// Parse raw file content as a structured document.
///
/// The path is only used for error attribution.
pub fn parse_document(content: &str, path: &Path) -> Result<Option<Document>, ProjectError> {
    let normalized = normalize_content(content);
    if normalized.trim().is_empty() {
        return Ok(None);
    }
    let value: Document =
        serde_yaml::from_str(&normalized).map_err(|source| ProjectError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if value.is_null() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Read and parse a YAML file into a typed model.
pub fn read_typed<T: DeserializeOwned>(path: &Path) -> Result<T, ProjectError> {
    if !path.exists() {
        return Err(ProjectError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&normalize_content(&raw)).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Calculate SHA-256 checksum of content, used for staleness detection
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}
