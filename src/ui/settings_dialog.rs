use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::config::{AppConfig, EditorSettings, SaveConfigRequest};
use crate::constants::MAX_NESTING_DEPTH;
use crate::paths;

/// State for the settings dialog
#[derive(Resource, Default)]
pub struct SettingsDialogState {
    /// Whether the dialog is open
    pub is_open: bool,
    /// Edited suffix appended to duplicated components
    pub duplicate_suffix: String,
    /// Edited nesting limit
    pub max_nesting_depth: usize,
    /// Edited pages folder (as string for text editing)
    pub pages_dir: String,
    /// Whether changes have been made
    pub has_changes: bool,
    /// Pending async file dialog for browsing folders
    pub pending_browse: Option<Task<Option<PathBuf>>>,
}

impl SettingsDialogState {
    /// Initialize the dialog state from current config
    pub fn load_from_config(&mut self, config: &AppConfig) {
        self.duplicate_suffix = config.data.editor.duplicate_suffix.clone();
        self.max_nesting_depth = config.data.editor.max_nesting_depth;
        self.pages_dir = config
            .data
            .pages_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        self.has_changes = false;
    }

    pub fn open_from_config(&mut self, config: &AppConfig) {
        self.load_from_config(config);
        self.is_open = true;
    }

    /// Write the edited values into the config
    pub fn apply_to(&self, config: &mut AppConfig) {
        config.data.editor = EditorSettings {
            duplicate_suffix: self.duplicate_suffix.clone(),
            max_nesting_depth: self.max_nesting_depth.max(1),
        };
        let trimmed = self.pages_dir.trim();
        config.data.pages_dir = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
        config.dirty = true;
    }
}

/// Renders the settings dialog
pub fn settings_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog_state: ResMut<SettingsDialogState>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    // Poll pending browse task (before early return so cleanup happens even if closed)
    if let Some(ref mut task) = dialog_state.pending_browse
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        dialog_state.pending_browse = None;
        if let Some(path) = result {
            dialog_state.pages_dir = path.to_string_lossy().to_string();
            dialog_state.has_changes = true;
        }
    }

    if !dialog_state.is_open {
        return Ok(());
    }

    let mut should_close = false;
    let mut should_save = false;
    let mut should_browse = false;
    let mut should_reset = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(true)
        .min_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Editor Settings");
            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Editing").strong());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Duplicate suffix:");
                    let response =
                        ui.add(egui::TextEdit::singleline(&mut dialog_state.duplicate_suffix));
                    if response.changed() {
                        dialog_state.has_changes = true;
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Max nesting depth:");
                    let response = ui.add(
                        egui::DragValue::new(&mut dialog_state.max_nesting_depth).range(1..=8),
                    );
                    if response.changed() {
                        dialog_state.has_changes = true;
                    }
                });

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!(
                        "Root components count as level 1. The default is {}.",
                        MAX_NESTING_DEPTH
                    ))
                    .weak()
                    .small(),
                );
            });

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Pages Folder").strong());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let default_dir = paths::default_pages_dir();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut dialog_state.pages_dir)
                            .desired_width(280.0)
                            .hint_text(default_dir.to_string_lossy().to_string()),
                    );
                    if response.changed() {
                        dialog_state.has_changes = true;
                    }

                    if ui.button("Browse...").clicked() {
                        should_browse = true;
                    }
                });

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Open and Save As dialogs start in this folder.")
                        .weak()
                        .small(),
                );
            });

            ui.add_space(12.0);

            // Recent pages (read-only display)
            ui.group(|ui| {
                ui.label(egui::RichText::new("Recent Pages").strong());
                ui.add_space(8.0);

                if config.data.recent_pages.is_empty() {
                    ui.label(egui::RichText::new("No recent pages").weak().italics());
                } else {
                    for (i, path) in config.data.recent_pages.iter().enumerate() {
                        ui.label(format!("{}. {}", i + 1, path.to_string_lossy()));
                    }
                }
            });

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(dialog_state.has_changes, egui::Button::new("Save"))
                    .clicked()
                {
                    should_save = true;
                }

                if ui.button("Cancel").clicked() {
                    should_close = true;
                }

                if ui.button("Restore Defaults").clicked() {
                    should_reset = true;
                }
            });
        });

    if should_browse && dialog_state.pending_browse.is_none() {
        let task_pool = AsyncComputeTaskPool::get();
        dialog_state.pending_browse = Some(task_pool.spawn(async {
            rfd::AsyncFileDialog::new()
                .set_title("Select Pages Folder")
                .pick_folder()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    if should_reset {
        let defaults = EditorSettings::default();
        dialog_state.duplicate_suffix = defaults.duplicate_suffix;
        dialog_state.max_nesting_depth = defaults.max_nesting_depth;
        dialog_state.pages_dir.clear();
        dialog_state.has_changes = true;
    }

    if should_save {
        dialog_state.apply_to(&mut config);
        save_events.write(SaveConfigRequest);
        info!(
            "Settings saved: suffix {:?}, max depth {}",
            config.data.editor.duplicate_suffix, config.data.editor.max_nesting_depth
        );
        should_close = true;
    }

    if should_close {
        dialog_state.is_open = false;
        dialog_state.pending_browse = None;
        dialog_state.load_from_config(&config);
    }

    Ok(())
}
