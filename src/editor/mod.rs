pub mod conditions;
pub mod history;
pub mod notifications;
pub mod reorder;
pub mod session;
mod shortcuts;

pub use history::{HistoryEntry, HistoryStack};
pub use notifications::{Notice, Notifications, Severity};
pub use reorder::{can_drop, reorder, reorder_to, DropPosition, ReorderRejection};
pub use session::{ActionOutcome, EditorAction, EditorSession, EditorShortcut};
pub use shortcuts::shortcut_from_keys;

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::registry::ComponentRegistry;

/// Message carrying one action for the session. Panels and shortcuts
/// write these; [`apply_editor_commands`] applies them in order.
#[derive(Message, Debug, Clone)]
pub struct EditorCommand(pub EditorAction);

/// Applies queued editor commands and surfaces their outcomes as toasts
pub fn apply_editor_commands(
    mut commands: MessageReader<EditorCommand>,
    mut session: ResMut<EditorSession>,
    registry: Res<ComponentRegistry>,
    config: Res<AppConfig>,
    time: Res<Time>,
    mut notifications: ResMut<Notifications>,
) {
    for EditorCommand(action) in commands.read() {
        let name = action.name();
        let outcome = session.apply(action.clone(), &registry, &config.data.editor);
        match &outcome {
            ActionOutcome::Applied { .. } => debug!("Applied {}", name),
            ActionOutcome::Unchanged => debug!("{} left the page unchanged", name),
            ActionOutcome::Denied(reason) => info!("Denied {}: {}", name, reason),
        }
        if let Some(notice) = outcome.notice() {
            notifications.push(notice, time.elapsed_secs_f64());
        }
    }
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorSession>()
            .init_resource::<ComponentRegistry>()
            .init_resource::<Notifications>()
            .add_message::<EditorCommand>()
            .add_systems(
                Update,
                (
                    shortcuts::handle_editor_shortcuts.run_if(conditions::no_dialog_open),
                    apply_editor_commands.run_if(on_message::<EditorCommand>),
                )
                    .chain(),
            )
            .add_systems(Update, notifications::expire_notifications);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<EditorSession>()
            .init_resource::<ComponentRegistry>()
            .init_resource::<Notifications>()
            .init_resource::<AppConfig>()
            .add_message::<EditorCommand>()
            .add_systems(Update, apply_editor_commands);
        app
    }

    #[test]
    fn test_commands_apply_in_order() {
        let mut app = test_app();
        app.world_mut()
            .write_message(EditorCommand(EditorAction::add("section")));
        app.world_mut()
            .write_message(EditorCommand(EditorAction::add("text")));
        app.update();

        let session = app.world().resource::<EditorSession>();
        assert_eq!(session.components().len(), 2);
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.selected().unwrap().component_type, "text");

        let notifications = app.world().resource::<Notifications>();
        assert_eq!(notifications.len(), 2);
    }

    #[test]
    fn test_denied_command_raises_error_notice() {
        let mut app = test_app();
        app.world_mut()
            .write_message(EditorCommand(EditorAction::add("text")));
        app.update();

        let id = app
            .world()
            .resource::<EditorSession>()
            .selected_id()
            .unwrap()
            .to_string();
        app.world_mut().resource_mut::<Notifications>().clear();

        app.world_mut()
            .write_message(EditorCommand(EditorAction::ToggleLock { id: id.clone() }));
        app.world_mut()
            .write_message(EditorCommand(EditorAction::Delete { id }));
        app.update();

        let session = app.world().resource::<EditorSession>();
        assert_eq!(session.components().len(), 1);

        let notifications = app.world().resource::<Notifications>();
        let last = notifications.iter().last().unwrap();
        assert_eq!(last.notice.severity, Severity::Error);
        assert_eq!(last.notice.description, "Cannot delete locked component");
    }
}
