//! Undo/Redo history for the page editor.
//!
//! Every change to the component collection pushes a full snapshot of the
//! collection. Undo, redo and jumping to an arbitrary entry just move a
//! cursor over those snapshots; nothing is diffed or replayed.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action
//! - History panel: click an entry to jump straight to it
//!
//! ## Module Structure
//!
//! - [`entry`] - HistoryEntry snapshot type
//! - [`history_stack`] - HistoryStack with the bounded cursor log

mod entry;
mod history_stack;


// Re-exports
pub use entry::HistoryEntry;
pub use history_stack::HistoryStack;
