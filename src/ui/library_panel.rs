use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::reorder::DropPosition;
use crate::editor::{EditorAction, EditorCommand, EditorSession};
use crate::registry::{ComponentCategory, ComponentRegistry};
use crate::theme;

#[derive(Resource, Default)]
pub struct LibraryPanelState {
    pub query: String,
}

/// Right panel listing every registered component type, grouped by category
pub fn library_panel_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<LibraryPanelState>,
    session: Res<EditorSession>,
    registry: Res<ComponentRegistry>,
    mut commands: MessageWriter<EditorCommand>,
) -> Result {
    egui::SidePanel::right("library_panel")
        .default_width(200.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Library").heading().size(18.0));
            ui.add_space(4.0);
            ui.add(
                egui::TextEdit::singleline(&mut state.query)
                    .hint_text("Search components")
                    .desired_width(f32::INFINITY),
            );
            ui.separator();

            let target = match add_placement(&session, &registry) {
                (Some(parent), _) => session
                    .get(&parent)
                    .map(|record| format!("Adds into {}", registry.label_for(record))),
                (None, _) => None,
            };
            ui.label(
                egui::RichText::new(target.as_deref().unwrap_or("Adds to the page"))
                    .color(theme::HINT_TEXT)
                    .small(),
            );
            ui.add_space(4.0);

            let matches = registry.search(&state.query);
            if matches.is_empty() {
                ui.label(egui::RichText::new("No matches").weak().italics());
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for category in ComponentCategory::all() {
                    let in_category: Vec<_> =
                        matches.iter().filter(|d| d.category == *category).collect();
                    if in_category.is_empty() {
                        continue;
                    }

                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(category.display_name())
                            .strong()
                            .color(theme::category_color(*category)),
                    );

                    for definition in in_category {
                        let button = egui::Button::new(definition.display_name)
                            .min_size(egui::vec2(ui.available_width(), 22.0));
                        if ui
                            .add(button)
                            .on_hover_text(definition.type_tag)
                            .clicked()
                        {
                            let (parent_id, position) = add_placement(&session, &registry);
                            commands.write(EditorCommand(EditorAction::Add {
                                component_type: definition.type_tag.to_string(),
                                props: None,
                                parent_id,
                                position,
                            }));
                        }
                    }
                }
            });
        });

    Ok(())
}

/// Where a component picked from the library lands.
///
/// Inside the selected component when it is a container, right after it
/// otherwise, and at the end of the page when nothing is selected.
pub(crate) fn add_placement(
    session: &EditorSession,
    registry: &ComponentRegistry,
) -> (Option<String>, DropPosition) {
    let Some(selected) = session.selected() else {
        return (None, DropPosition::End);
    };
    if registry.accepts_children(&selected.component_type) {
        (Some(selected.id.clone()), DropPosition::End)
    } else {
        (
            selected.parent_id.clone(),
            DropPosition::After(selected.id.clone()),
        )
    }
}
