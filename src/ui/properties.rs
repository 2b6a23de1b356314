use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use serde_json::Value;

use crate::editor::{EditorAction, EditorCommand, EditorSession};
use crate::page::{PageData, Props};
use crate::registry::ComponentRegistry;
use crate::theme;

/// Uncommitted prop edits for the selected component
#[derive(Resource, Default)]
pub struct PropsDraft {
    pub component_id: Option<String>,
    /// Session revision the draft was taken at
    pub revision: u64,
    pub props: Props,
}

impl PropsDraft {
    /// Reload from the session when the selection or the page changed underneath.
    /// Returns true if the draft was replaced.
    pub fn sync(&mut self, session: &EditorSession) -> bool {
        let selected = session.selected_id();
        if self.component_id.as_deref() == selected && self.revision == session.revision() {
            return false;
        }
        self.component_id = selected.map(str::to_string);
        self.revision = session.revision();
        self.props = session.selected().map(|r| r.props.clone()).unwrap_or_default();
        true
    }

    /// The update to send, if the draft differs from the stored props
    pub fn pending_update(&self, session: &EditorSession) -> Option<EditorAction> {
        let id = self.component_id.as_ref()?;
        let record = session.get(id)?;
        (record.props != self.props).then(|| EditorAction::UpdateProps {
            id: id.clone(),
            props: self.props.clone(),
        })
    }
}

pub fn properties_panel_ui(
    mut contexts: EguiContexts,
    mut draft: ResMut<PropsDraft>,
    mut page_data: ResMut<PageData>,
    session: Res<EditorSession>,
    registry: Res<ComponentRegistry>,
    mut commands: MessageWriter<EditorCommand>,
) -> Result {
    draft.sync(&session);

    egui::SidePanel::right("properties_panel")
        .default_width(260.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Page").heading().size(18.0));
            ui.add_space(4.0);
            page_metadata_ui(ui, &mut page_data);

            ui.add_space(8.0);
            ui.separator();
            ui.label(egui::RichText::new("Properties").heading().size(18.0));
            ui.add_space(4.0);

            let Some(record) = session.selected() else {
                ui.label("No component selected");
                return;
            };

            let definition = registry.resolve(&record.component_type);
            ui.label(
                egui::RichText::new(definition.display_name)
                    .strong()
                    .color(theme::category_color(definition.category)),
            );
            if record.locked {
                ui.label(
                    egui::RichText::new("Locked: unlock to edit")
                        .color(theme::LOCKED_TEXT)
                        .small(),
                );
            }
            ui.add_space(4.0);

            ui.add_enabled_ui(!record.locked, |ui| {
                egui::Grid::new("props_grid")
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for (key, value) in draft.props.iter_mut() {
                            ui.label(egui::RichText::new(key).color(theme::LABEL_TEXT));
                            prop_editor(ui, key, value);
                            ui.end_row();
                        }
                    });

                if draft.props.is_empty() {
                    ui.label(egui::RichText::new("No editable properties").weak().italics());
                }

                ui.add_space(8.0);
                let update = draft.pending_update(&session);
                ui.horizontal(|ui| {
                    let has_changes = update.is_some();
                    if ui
                        .add_enabled(has_changes, egui::Button::new("Apply"))
                        .clicked()
                        && let Some(action) = update
                    {
                        commands.write(EditorCommand(action));
                    }
                    if ui
                        .add_enabled(has_changes, egui::Button::new("Revert"))
                        .clicked()
                    {
                        draft.props = record.props.clone();
                    }
                });
            });
        });

    Ok(())
}

fn page_metadata_ui(ui: &mut egui::Ui, page: &mut PageData) {
    egui::Grid::new("page_meta_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Title:");
            ui.text_edit_singleline(&mut page.title);
            ui.end_row();

            ui.label("Slug:");
            let hint = PageData::slug_from_title(&page.title);
            ui.add(egui::TextEdit::singleline(&mut page.slug).hint_text(hint));
            ui.end_row();

            ui.label("Description:");
            ui.add(egui::TextEdit::multiline(&mut page.description).desired_rows(2));
            ui.end_row();
        });
}

/// Editor widget for one prop, chosen by its JSON type
fn prop_editor(ui: &mut egui::Ui, key: &str, value: &mut Value) {
    match value {
        Value::String(text) => {
            if text.len() > 40 || text.contains('\n') {
                ui.add(egui::TextEdit::multiline(text).desired_rows(3));
            } else {
                ui.text_edit_singleline(text);
            }
        }
        Value::Bool(flag) => {
            ui.checkbox(flag, "");
        }
        Value::Number(number) => {
            if let Some(mut whole) = number.as_i64() {
                if ui.add(egui::DragValue::new(&mut whole)).changed() {
                    *value = Value::from(whole);
                }
            } else if let Some(mut real) = number.as_f64()
                && ui.add(egui::DragValue::new(&mut real).speed(0.1)).changed()
                && let Some(updated) = serde_json::Number::from_f64(real)
            {
                *value = Value::Number(updated);
            }
        }
        other => {
            ui.label(egui::RichText::new(other.to_string()).weak())
                .on_hover_text(format!("{} cannot be edited here", key));
        }
    }
}
