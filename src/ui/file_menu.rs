use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, ConfigResetNotification, MissingPageWarning, SaveConfigRequest};
use crate::page::{
    AsyncPageOperation, LoadPageRequest, LoadValidationWarning, NewPageRequest, PageData,
    PageLoadError, PageSaveError, SavePageRequest,
};
use crate::paths;
use crate::theme;

/// Which native file dialog is being awaited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingFileDialog {
    Open,
    SaveAs,
}

#[derive(Resource, Default)]
pub struct FileMenuState {
    pub show_new_confirmation: bool,
    pub pending_open: Option<Task<Option<PathBuf>>>,
    pub pending_save_as: Option<Task<Option<PathBuf>>>,
}

impl FileMenuState {
    /// Spawn a native open/save dialog unless one of that kind is already up
    pub fn request(&mut self, kind: PendingFileDialog, config: &AppConfig, page: &PageData) {
        let start_dir = config
            .data
            .pages_dir
            .clone()
            .unwrap_or_else(paths::default_pages_dir);
        let task_pool = AsyncComputeTaskPool::get();

        match kind {
            PendingFileDialog::Open => {
                if self.pending_open.is_some() {
                    return;
                }
                self.pending_open = Some(task_pool.spawn(async move {
                    rfd::AsyncFileDialog::new()
                        .set_title("Open Page")
                        .set_directory(&start_dir)
                        .add_filter("Page", &["json"])
                        .pick_file()
                        .await
                        .map(|h| h.path().to_path_buf())
                }));
            }
            PendingFileDialog::SaveAs => {
                if self.pending_save_as.is_some() {
                    return;
                }
                let file_name = format!("{}.json", suggested_file_stem(page));
                self.pending_save_as = Some(task_pool.spawn(async move {
                    rfd::AsyncFileDialog::new()
                        .set_title("Save Page As")
                        .set_directory(&start_dir)
                        .set_file_name(file_name)
                        .add_filter("Page", &["json"])
                        .save_file()
                        .await
                        .map(|h| with_json_extension(h.path()))
                }));
            }
        }
    }

    pub fn any_file_dialog_pending(&self) -> bool {
        self.pending_open.is_some() || self.pending_save_as.is_some()
    }
}

/// Default file name for a page: its slug, falling back to a sanitized title
fn suggested_file_stem(page: &PageData) -> String {
    let slug = page.effective_slug();
    let stem = if slug.is_empty() {
        sanitize_filename(&page.title)
    } else {
        sanitize_filename(&slug)
    };
    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn with_json_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "json") {
        path.to_path_buf()
    } else {
        path.with_extension("json")
    }
}

/// Forward finished native dialogs as page requests
pub fn poll_file_dialogs(
    mut menu_state: ResMut<FileMenuState>,
    mut save_events: MessageWriter<SavePageRequest>,
    mut load_events: MessageWriter<LoadPageRequest>,
) {
    if let Some(ref mut task) = menu_state.pending_open
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        menu_state.pending_open = None;
        if let Some(path) = result {
            load_events.write(LoadPageRequest { path });
        }
    }

    if let Some(ref mut task) = menu_state.pending_save_as
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        menu_state.pending_save_as = None;
        if let Some(path) = result {
            save_events.write(SavePageRequest { path });
        }
    }
}

/// Renders the new-page confirmation (triggered from the menu bar)
pub fn file_menu_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    mut new_events: MessageWriter<NewPageRequest>,
) -> Result {
    if menu_state.show_new_confirmation {
        egui::Window::new("New Page")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                ui.label("Create a new page? Unsaved changes will be lost.");
                ui.horizontal(|ui| {
                    if ui.button("Create New").clicked() {
                        new_events.write(NewPageRequest);
                        menu_state.show_new_confirmation = false;
                    }
                    if ui.button("Cancel").clicked() {
                        menu_state.show_new_confirmation = false;
                    }
                });
            });
    }

    Ok(())
}

/// Blocking overlay while a page is being read or written
pub fn async_operation_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncPageOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    egui::Modal::new(egui::Id::new("async_operation_modal"))
        .backdrop_color(theme::MODAL_OVERLAY)
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                let text = async_op
                    .operation_description
                    .as_deref()
                    .unwrap_or("Working...");
                ui.label(text);
            });
        });

    Ok(())
}

/// Save and load failures, each dismissed with OK
pub fn page_error_dialogs_ui(
    mut contexts: EguiContexts,
    mut save_error: ResMut<PageSaveError>,
    mut load_error: ResMut<PageLoadError>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if let Some(error) = save_error.message.clone()
        && error_window(ctx, "Save Error", &error)
    {
        save_error.message = None;
    }

    if let Some(error) = load_error.message.clone()
        && error_window(ctx, "Load Error", &error)
    {
        load_error.message = None;
    }

    Ok(())
}

/// Returns true once the user dismisses the window
fn error_window(ctx: &egui::Context, title: &str, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ERROR_TEXT, message);
            });
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

/// Lists the integrity problems repaired while loading a page
pub fn load_validation_warning_ui(
    mut contexts: EguiContexts,
    mut warning: ResMut<LoadValidationWarning>,
) -> Result {
    if !warning.show {
        return Ok(());
    }

    egui::Window::new("Page Repaired")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The page file had problems that were fixed while loading:");

            if let Some(ref path) = warning.page_path {
                ui.add_space(5.0);
                let path_str = path.to_string_lossy();
                ui.label(egui::RichText::new(shorten_path(&path_str, 50)).weak())
                    .on_hover_text(path_str.as_ref());
            }

            ui.add_space(5.0);
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                for issue in &warning.issues {
                    ui.colored_label(theme::WARNING_TEXT, format!("• {}", issue));
                }
            });

            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("Save the page to keep the repaired version.")
                    .color(theme::HINT_TEXT)
                    .small(),
            );
            if ui.button("OK").clicked() {
                warning.show = false;
                warning.issues.clear();
            }
        });

    Ok(())
}

/// Shown once at startup when the config file could not be read
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings file could not be read and was reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
            }
        });

    Ok(())
}

/// Renders the missing page warning (shown at startup if the last page is gone)
pub fn missing_page_warning_ui(
    mut contexts: EguiContexts,
    mut warning: ResMut<MissingPageWarning>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    if !warning.show {
        return Ok(());
    }

    egui::Window::new("Page Not Found")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The last opened page file no longer exists:");

            if let Some(ref path) = warning.path {
                ui.add_space(5.0);
                let path_str = path.to_string_lossy();
                ui.label(egui::RichText::new(shorten_path(&path_str, 50)).weak())
                    .on_hover_text(path_str.as_ref());
                ui.add_space(10.0);
            }

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    warning.show = false;
                }

                if ui.button("Clear from history").clicked() {
                    if let Some(ref path) = warning.path {
                        config.data.recent_pages.retain(|p| p != path);
                    }
                    config.data.last_page_path = None;
                    config.dirty = true;
                    save_events.write(SaveConfigRequest);
                    warning.show = false;
                }
            });
        });

    Ok(())
}

/// Keep the tail of long paths, which carries the file name
fn shorten_path(path: &str, max_chars: usize) -> String {
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}
