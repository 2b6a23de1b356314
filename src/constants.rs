//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Maximum number of snapshots kept in the undo/redo history
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Maximum nesting depth of the component tree (roots are level 1)
pub const MAX_NESTING_DEPTH: usize = 3;

/// Marker appended to the primary text of a duplicated component
pub const DEFAULT_DUPLICATE_SUFFIX: &str = " (copy)";

/// Prop used for the copy marker when a component type declares none
pub const FALLBACK_TEXT_FIELD: &str = "content";

/// Maximum number of recent page files to remember in config
pub const MAX_RECENT_PAGES: usize = 5;

/// Seconds a toast notification stays on screen
pub const NOTIFICATION_LIFETIME_SECS: f64 = 4.0;

/// Maximum number of toasts queued at once; older ones are dropped
pub const MAX_VISIBLE_NOTIFICATIONS: usize = 5;

/// Version written into saved page files
pub const PAGE_FILE_VERSION: u32 = 1;
