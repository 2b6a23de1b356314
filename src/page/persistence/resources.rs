//! Resource types for page persistence state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use crate::editor::EditorSession;
use crate::page::PageData;

use super::results::{LoadResult, SaveResult};

#[derive(Resource, Default)]
pub struct PageLoadError {
    pub message: Option<String>,
}

/// Resource tracking save operation errors for display to user.
#[derive(Resource, Default)]
pub struct PageSaveError {
    pub message: Option<String>,
}

/// Resource for problems found (and repaired) in a loaded page file.
#[derive(Resource, Default)]
pub struct LoadValidationWarning {
    /// Whether to show the warning dialog
    pub show: bool,
    /// One line per integrity issue
    pub issues: Vec<String>,
    /// The page file the issues were found in
    pub page_path: Option<PathBuf>,
}

/// Resource tracking async page I/O operations for modal dialog
#[derive(Resource, Default)]
pub struct AsyncPageOperation {
    /// Whether a save operation is in progress
    pub is_saving: bool,
    /// Whether a load operation is in progress
    pub is_loading: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncPageOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }
}

/// Component for save task
#[derive(Component)]
pub struct SavePageTask(pub Task<SaveResult>);

/// Component for load task
#[derive(Component)]
pub struct LoadPageTask(pub Task<LoadResult>);

/// Resource tracking the currently loaded page file path
#[derive(Resource, Default)]
pub struct CurrentPageFile {
    pub path: Option<PathBuf>,
}

impl CurrentPageFile {
    /// File name without extension, for window titles and menus
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
            .to_string()
    }
}

/// Resource remembering what was last written to (or read from) disk
#[derive(Resource, Default)]
pub struct PageDirtyState {
    /// Session revision at the last save/load
    pub saved_revision: u64,
    /// Page metadata at the last save/load
    pub saved_page: PageData,
}

impl PageDirtyState {
    pub fn mark_saved(&mut self, revision: u64, page: PageData) {
        self.saved_revision = revision;
        self.saved_page = page;
    }

    /// True when the components or the metadata changed since the last save
    pub fn is_dirty(&self, session: &EditorSession, page: &PageData) -> bool {
        session.revision() != self.saved_revision || *page != self.saved_page
    }
}
