//! Reading and writing page files, plus the integrity pass run on load.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::page::{check_integrity, repair_collection, IntegrityIssue, SavedPage};

#[derive(Debug, thiserror::Error)]
pub enum PageFileError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse page file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize page: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub fn write_page(path: &Path, page: &SavedPage) -> Result<(), PageFileError> {
    let json = serde_json::to_string_pretty(page).map_err(PageFileError::Serialize)?;
    std::fs::write(path, json).map_err(|source| PageFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_page(path: &Path) -> Result<SavedPage, PageFileError> {
    let json = std::fs::read_to_string(path).map_err(|source| PageFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(PageFileError::Parse)
}

/// Validates a freshly read page and repairs its component collection.
///
/// Returns the issues that were found; the page is usable either way.
pub fn repair_loaded_page(saved: &mut SavedPage) -> Vec<IntegrityIssue> {
    let issues = check_integrity(&saved.components);
    if !issues.is_empty() {
        saved.components = repair_collection(&saved.components);
    }
    issues
}

pub fn ensure_pages_directory() {
    let pages_dir = crate::paths::default_pages_dir();
    if !pages_dir.exists()
        && let Err(e) = std::fs::create_dir_all(&pages_dir)
    {
        warn!("Failed to create pages directory: {}", e);
    }
}
