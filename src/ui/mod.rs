mod component_tree;
pub mod file_menu;
mod history_panel;
mod library_panel;
mod menu_bar;
mod properties;
mod settings_dialog;
mod toasts;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::{ConfigResetNotification, MissingPageWarning};
use crate::page::{AsyncPageOperation, LoadValidationWarning, PageLoadError, PageSaveError};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
#[allow(clippy::too_many_arguments)]
fn update_dialog_state(
    file_menu: Res<file_menu::FileMenuState>,
    settings: Res<settings_dialog::SettingsDialogState>,
    config_reset: Res<ConfigResetNotification>,
    missing_page: Res<MissingPageWarning>,
    load_validation: Res<LoadValidationWarning>,
    save_error: Res<PageSaveError>,
    load_error: Res<PageLoadError>,
    async_op: Res<AsyncPageOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = file_menu.show_new_confirmation
        || file_menu.any_file_dialog_pending()
        || settings.is_open
        || settings.pending_browse.is_some()
        || config_reset.show
        || missing_page.show
        || load_validation.show
        || save_error.message.is_some()
        || load_error.message.is_some()
        || async_op.is_busy();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<file_menu::FileMenuState>()
            .init_resource::<library_panel::LibraryPanelState>()
            .init_resource::<properties::PropsDraft>()
            .init_resource::<settings_dialog::SettingsDialogState>()
            // Top bar first so the side panels fit below it
            .add_systems(EguiPrimaryContextPass, menu_bar::menu_bar_ui)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Then side panels
                    component_tree::component_tree_ui,
                    library_panel::library_panel_ui,
                    properties::properties_panel_ui,
                    history_panel::history_panel_ui,
                )
                    .chain()
                    .after(menu_bar::menu_bar_ui),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    file_menu::file_menu_ui,
                    file_menu::async_operation_modal_ui,
                    file_menu::page_error_dialogs_ui,
                    file_menu::load_validation_warning_ui,
                    file_menu::config_reset_notification_ui,
                    file_menu::missing_page_warning_ui,
                    settings_dialog::settings_dialog_ui,
                    toasts::toasts_ui,
                )
                    .after(history_panel::history_panel_ui),
            )
            .add_systems(Update, file_menu::poll_file_dialogs)
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
