//! Project State Management
//!
//! The cache owns the current snapshot of the project's watched files and
//! exposes reload, read, and staleness checks.

pub mod cache;

pub use cache::{ProjectCache, ProjectSnapshot, ReloadPolicy, StalenessReport, WATCHED_FILES};
