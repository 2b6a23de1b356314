use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::AppConfig;
use crate::editor::{EditorCommand, EditorSession, EditorShortcut};
use crate::page::{CurrentPageFile, LoadPageRequest, PageData, PageDirtyState, SavePageRequest};
use crate::theme;

use super::file_menu::{FileMenuState, PendingFileDialog};
use super::settings_dialog::SettingsDialogState;

/// Top menu bar with file and edit menus
#[allow(clippy::too_many_arguments)]
pub fn menu_bar_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    mut settings_state: ResMut<SettingsDialogState>,
    session: Res<EditorSession>,
    page_data: Res<PageData>,
    dirty_state: Res<PageDirtyState>,
    current_file: Res<CurrentPageFile>,
    config: Res<AppConfig>,
    mut save_events: MessageWriter<SavePageRequest>,
    mut load_events: MessageWriter<LoadPageRequest>,
    mut commands: MessageWriter<EditorCommand>,
) -> Result {
    let is_dirty = dirty_state.is_dirty(&session, &page_data);

    egui::TopBottomPanel::top("menu_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Page").clicked() {
                    menu_state.show_new_confirmation = true;
                    ui.close();
                }

                ui.separator();

                if ui.button("Open...").clicked() {
                    menu_state.request(PendingFileDialog::Open, &config, &page_data);
                    ui.close();
                }

                ui.add_enabled_ui(!config.data.recent_pages.is_empty(), |ui| {
                    ui.menu_button("Open Recent", |ui| {
                        for path in &config.data.recent_pages {
                            let name = path.to_string_lossy();
                            if ui.button(name.as_ref()).clicked() {
                                load_events.write(LoadPageRequest { path: path.clone() });
                                ui.close();
                            }
                        }
                    });
                });

                ui.separator();

                if ui.button("Save").clicked() {
                    match &current_file.path {
                        Some(path) => {
                            save_events.write(SavePageRequest { path: path.clone() });
                        }
                        None => menu_state.request(PendingFileDialog::SaveAs, &config, &page_data),
                    }
                    ui.close();
                }

                if ui.button("Save As...").clicked() {
                    menu_state.request(PendingFileDialog::SaveAs, &config, &page_data);
                    ui.close();
                }

                ui.separator();

                if ui.button("Settings...").clicked() {
                    settings_state.open_from_config(&config);
                    ui.close();
                }
            });

            ui.menu_button("Edit", |ui| {
                let history = session.history();
                let entries = [
                    ("Undo (Ctrl+Z)", EditorShortcut::Undo, history.can_undo()),
                    ("Redo (Ctrl+Y)", EditorShortcut::Redo, history.can_redo()),
                    ("Duplicate (Ctrl+D)", EditorShortcut::DuplicateSelected, true),
                    ("Lock / Unlock (Ctrl+L)", EditorShortcut::ToggleLockSelected, true),
                    ("Move Up (Ctrl+Shift+Up)", EditorShortcut::MoveSelectedUp, true),
                    ("Move Down (Ctrl+Shift+Down)", EditorShortcut::MoveSelectedDown, true),
                    ("Delete (Del)", EditorShortcut::DeleteSelected, true),
                ];
                for (label, shortcut, enabled) in entries {
                    let action = session.action_for_shortcut(shortcut);
                    if ui
                        .add_enabled(enabled && action.is_some(), egui::Button::new(label))
                        .clicked()
                    {
                        if let Some(action) = action {
                            commands.write(EditorCommand(action));
                        }
                        ui.close();
                    }
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let marker = if is_dirty { " •" } else { "" };
                ui.label(
                    egui::RichText::new(format!("{}{}", current_file.display_name(), marker))
                        .color(theme::LABEL_TEXT),
                );
                ui.label(
                    egui::RichText::new(format!("{} components", session.components().len()))
                        .color(theme::HINT_TEXT)
                        .small(),
                );
            });
        });
    });
    Ok(())
}
