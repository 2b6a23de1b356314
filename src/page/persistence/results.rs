//! Result types for async page operations.

use std::path::PathBuf;

use crate::page::{PageData, SavedPage};

use super::file::PageFileError;

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    /// Session revision that was written
    pub revision: u64,
    /// Page metadata that was written
    pub page: PageData,
    pub outcome: Result<(), PageFileError>,
}

/// Result of an async load operation
pub struct LoadResult {
    pub path: PathBuf,
    pub outcome: Result<SavedPage, PageFileError>,
}
