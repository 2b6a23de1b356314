//! Pageforge: a visual page builder.
//!
//! A page is a flat collection of [`page::ComponentRecord`]s linked by
//! parent ids. The [`editor::EditorSession`] owns that collection, applies
//! every user action to it, and keeps a bounded snapshot history for undo
//! and redo. The egui panels in [`ui`] only read the session and send
//! [`editor::EditorCommand`] messages back.

pub mod config;
pub mod constants;
pub mod editor;
pub mod page;
pub mod paths;
pub mod registry;
pub mod theme;
pub mod ui;
