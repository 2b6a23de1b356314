//! The editing session: current components, selection and undo history.
//!
//! All edits go through [`EditorSession::apply`]. A mutation computes a new
//! collection from the current one, pushes it onto the history and then
//! replaces the current collection, so the history cursor always points at
//! exactly what is on screen.
//!
//! ## Module Structure
//!
//! - [`action`] - EditorAction, ActionOutcome and EditorShortcut
//! - [`state`] - EditorSession resource and the action handlers

mod action;
mod state;

#[cfg(test)]
mod tests;

pub use action::{ActionOutcome, EditorAction, EditorShortcut};
pub use state::EditorSession;
