//! Keyboard shortcuts for session actions.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::session::{EditorSession, EditorShortcut};
use super::EditorCommand;

/// Maps the keys pressed this frame to a shortcut.
///
/// Super (Cmd) counts as Ctrl so the same bindings work on macOS.
pub fn shortcut_from_keys(keyboard: &ButtonInput<KeyCode>) -> Option<EditorShortcut> {
    let ctrl = keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]);
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if !ctrl {
        if keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
            return Some(EditorShortcut::DeleteSelected);
        }
        return None;
    }

    if keyboard.just_pressed(KeyCode::KeyZ) {
        // Ctrl+Shift+Z = redo
        return Some(if shift {
            EditorShortcut::Redo
        } else {
            EditorShortcut::Undo
        });
    }
    if keyboard.just_pressed(KeyCode::KeyY) {
        return Some(EditorShortcut::Redo);
    }
    if keyboard.just_pressed(KeyCode::KeyD) {
        return Some(EditorShortcut::DuplicateSelected);
    }
    if keyboard.just_pressed(KeyCode::KeyL) {
        return Some(EditorShortcut::ToggleLockSelected);
    }
    if shift && keyboard.just_pressed(KeyCode::ArrowUp) {
        return Some(EditorShortcut::MoveSelectedUp);
    }
    if shift && keyboard.just_pressed(KeyCode::ArrowDown) {
        return Some(EditorShortcut::MoveSelectedDown);
    }
    None
}

/// Turns shortcuts into editor commands
pub fn handle_editor_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    session: Res<EditorSession>,
    mut contexts: EguiContexts,
    mut commands: MessageWriter<EditorCommand>,
) {
    // Don't trigger if typing in UI
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let Some(shortcut) = shortcut_from_keys(&keyboard) else {
        return;
    };
    if let Some(action) = session.action_for_shortcut(shortcut) {
        commands.write(EditorCommand(action));
    }
}
