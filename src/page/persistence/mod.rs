//! Page persistence: saving and loading page files.
//!
//! Handles async file I/O for pages, including:
//! - Save/load with async task pooling
//! - Integrity validation and repair of loaded component collections
//! - Dirty state tracking
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for page operations
//! - [`resources`] - Resource types for state tracking
//! - [`results`] - Result types for async operations
//! - [`file`] - Synchronous read/write and the load-time integrity pass
//! - [`save`] - Save system and task polling
//! - [`load`] - Load system and task polling
//! - [`page_state`] - New page system
//!
//! ## Key Types
//!
//! - [`PageDirtyState`] - Tracks unsaved changes
//! - [`AsyncPageOperation`] - Tracks async I/O state

mod file;
mod load;
mod messages;
mod page_state;
mod resources;
mod results;
mod save;


// Re-exports - Messages
pub use messages::{LoadPageRequest, NewPageRequest, SavePageRequest};

// Re-exports - Resources
pub use resources::{
    AsyncPageOperation, CurrentPageFile, LoadValidationWarning, PageDirtyState, PageLoadError,
    PageSaveError,
};

// Re-exports - File access
pub use file::{ensure_pages_directory, read_page, repair_loaded_page, write_page, PageFileError};

// Re-exports - Systems
pub use load::{load_page_system, poll_load_tasks, reopen_last_page};
pub use page_state::new_page_system;
pub use save::{poll_save_tasks, save_page_system};
