use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::AppConfig;
use crate::editor::reorder::can_drop;
use crate::editor::{EditorAction, EditorCommand, EditorSession};
use crate::page::{flatten_tree, ComponentRecord, Hierarchy};
use crate::registry::ComponentRegistry;
use crate::theme;

const INDENT_WIDTH: f32 = 14.0;

/// Left panel: the page outline with per-row structure controls
pub fn component_tree_ui(
    mut contexts: EguiContexts,
    session: Res<EditorSession>,
    registry: Res<ComponentRegistry>,
    config: Res<AppConfig>,
    mut commands: MessageWriter<EditorCommand>,
) -> Result {
    let max_depth = config.data.editor.max_nesting_depth;
    let mut actions: Vec<EditorAction> = Vec::new();
    let forest = session.tree();
    let rows = flatten_tree(&forest);
    let selected = session.selected_id();

    egui::SidePanel::left("component_tree")
        .default_width(240.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Outline").heading().size(18.0));
            ui.add_space(4.0);
            ui.separator();

            if rows.is_empty() {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("No components yet. Add one from the library.")
                        .color(theme::HINT_TEXT)
                        .italics(),
                );
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for row in &rows {
                    let record = row.record;
                    let is_selected = selected == Some(record.id.as_str());

                    ui.horizontal(|ui| {
                        ui.add_space(row.depth as f32 * INDENT_WIDTH);

                        let mut text = egui::RichText::new(registry.label_for(record));
                        if record.locked {
                            text = text.color(theme::LOCKED_TEXT);
                        }
                        let response = ui.selectable_label(is_selected, text);
                        if response.clicked() {
                            let target = (!is_selected).then(|| record.id.clone());
                            actions.push(EditorAction::Select(target));
                        }
                        response.on_hover_text(registry.resolve(&record.component_type).display_name);

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let lock_text = if record.locked { "🔒" } else { "🔓" };
                            if ui.small_button(lock_text).clicked() {
                                actions.push(EditorAction::ToggleLock {
                                    id: record.id.clone(),
                                });
                            }
                            if !is_selected {
                                return;
                            }
                            ui.add_enabled_ui(!record.locked, |ui| {
                                row_controls(
                                    ui,
                                    session.components(),
                                    record,
                                    &registry,
                                    max_depth,
                                    &mut actions,
                                );
                            });
                        });
                    });
                }
            });

            if let Some(record) = session.selected() {
                ui.separator();
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!record.locked, |ui| {
                        if ui.button("Duplicate").clicked() {
                            actions.push(EditorAction::Duplicate {
                                id: record.id.clone(),
                            });
                        }
                        if ui.button("Delete").clicked() {
                            actions.push(EditorAction::Delete {
                                id: record.id.clone(),
                            });
                        }
                    });
                });
            }
        });

    for action in actions {
        commands.write(EditorCommand(action));
    }
    Ok(())
}

/// Up/down/indent/outdent buttons for the selected row (laid out right to left)
fn row_controls(
    ui: &mut egui::Ui,
    list: &[ComponentRecord],
    record: &ComponentRecord,
    registry: &ComponentRegistry,
    max_depth: usize,
    actions: &mut Vec<EditorAction>,
) {
    let outdent = outdent_target(list, &record.id, max_depth);
    if ui
        .add_enabled(outdent.is_some(), egui::Button::new("←").small())
        .on_hover_text("Move out of the parent")
        .clicked()
        && let Some(action) = outdent
    {
        actions.push(action);
    }

    let indent = indent_target(list, &record.id, registry, max_depth);
    if ui
        .add_enabled(indent.is_some(), egui::Button::new("→").small())
        .on_hover_text("Nest inside the previous component")
        .clicked()
        && let Some(action) = indent
    {
        actions.push(action);
    }

    if ui.small_button("↓").clicked() {
        actions.push(EditorAction::MoveDown {
            id: record.id.clone(),
        });
    }
    if ui.small_button("↑").clicked() {
        actions.push(EditorAction::MoveUp {
            id: record.id.clone(),
        });
    }
}

/// Nest `id` as the last child of its previous sibling, if that sibling is a
/// container with room for it
pub(crate) fn indent_target(
    list: &[ComponentRecord],
    id: &str,
    registry: &ComponentRegistry,
    max_depth: usize,
) -> Option<EditorAction> {
    let hierarchy = Hierarchy::new(list);
    let record = hierarchy.get(id)?;
    let parent = hierarchy.parent_id(id);
    let siblings = hierarchy.children(parent);
    let position = siblings.iter().position(|s| s.id == record.id)?;
    let previous = siblings.get(position.checked_sub(1)?)?;

    if !registry.accepts_children(&previous.component_type)
        || can_drop(list, id, Some(previous.id.as_str()), max_depth).is_err()
    {
        return None;
    }

    Some(EditorAction::Reorder {
        id: record.id.clone(),
        new_parent_id: Some(previous.id.clone()),
        new_index: hierarchy.children(Some(previous.id.as_str())).len(),
    })
}

/// Lift `id` out of its parent, placing it right after the parent
pub(crate) fn outdent_target(
    list: &[ComponentRecord],
    id: &str,
    max_depth: usize,
) -> Option<EditorAction> {
    let hierarchy = Hierarchy::new(list);
    let parent = hierarchy.parent_id(id)?;
    let grandparent = hierarchy.parent_id(parent);
    can_drop(list, id, grandparent, max_depth).ok()?;
    let parent_slot = hierarchy
        .children(grandparent)
        .iter()
        .position(|s| s.id == parent)?;

    Some(EditorAction::Reorder {
        id: id.to_string(),
        new_parent_id: grandparent.map(str::to_string),
        new_index: parent_slot + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorSettings;
    use crate::constants::MAX_NESTING_DEPTH;
    use crate::page::{build_tree, Props};

    fn record(id: &str, kind: &str, parent: Option<&str>, order: f64) -> ComponentRecord {
        ComponentRecord {
            id: id.to_string(),
            component_type: kind.to_string(),
            props: Props::new(),
            parent_id: parent.map(str::to_string),
            order_index: order,
            locked: false,
        }
    }

    fn outline() -> Vec<ComponentRecord> {
        vec![
            record("s1", "section", None, 0.0),
            record("h", "heading", Some("s1"), 0.0),
            record("t", "text", Some("s1"), 1.0),
            record("s2", "section", None, 1.0),
            record("btn", "button", None, 2.0),
        ]
    }

    #[test]
    fn test_indent_into_previous_container() {
        let registry = ComponentRegistry::default();
        let action = indent_target(&outline(), "s2", &registry, MAX_NESTING_DEPTH);
        assert_eq!(
            action,
            Some(EditorAction::Reorder {
                id: "s2".to_string(),
                new_parent_id: Some("s1".to_string()),
                new_index: 2,
            })
        );
    }

    #[test]
    fn test_indent_needs_a_previous_sibling() {
        let registry = ComponentRegistry::default();
        assert_eq!(indent_target(&outline(), "s1", &registry, MAX_NESTING_DEPTH), None);
        assert_eq!(indent_target(&outline(), "h", &registry, MAX_NESTING_DEPTH), None);
    }

    #[test]
    fn test_indent_refuses_leaf_previous_sibling() {
        let registry = ComponentRegistry::default();
        // "t" follows "h", a heading, which cannot hold children
        assert_eq!(indent_target(&outline(), "t", &registry, MAX_NESTING_DEPTH), None);
    }

    #[test]
    fn test_indent_refuses_moves_past_depth_limit() {
        let registry = ComponentRegistry::default();
        // c1 > c2 > {c3, c4}: nesting c4 inside c3 would make a fourth level
        let list = vec![
            record("c1", "section", None, 0.0),
            record("c2", "section", Some("c1"), 0.0),
            record("c3", "section", Some("c2"), 0.0),
            record("c4", "text", Some("c2"), 1.0),
        ];
        assert_eq!(indent_target(&list, "c4", &registry, MAX_NESTING_DEPTH), None);
        assert!(indent_target(&list, "c4", &registry, MAX_NESTING_DEPTH + 1).is_some());

        // A lowered limit also hides the indent the default would allow
        assert_eq!(indent_target(&outline(), "s2", &registry, 1), None);
        assert!(outdent_target(&list, "c4", MAX_NESTING_DEPTH).is_some());
    }

    #[test]
    fn test_outdent_places_after_parent() {
        let action = outdent_target(&outline(), "h", MAX_NESTING_DEPTH);
        assert_eq!(
            action,
            Some(EditorAction::Reorder {
                id: "h".to_string(),
                new_parent_id: None,
                new_index: 1,
            })
        );
        assert_eq!(outdent_target(&outline(), "s1", MAX_NESTING_DEPTH), None);
    }

    #[test]
    fn test_outdent_applied_through_session() {
        let registry = ComponentRegistry::default();
        let settings = EditorSettings::default();
        let mut session = EditorSession::new(outline());

        let action =
            outdent_target(session.components(), "h", settings.max_nesting_depth).unwrap();
        assert!(session.apply(action, &registry, &settings).is_applied());

        let forest = build_tree(session.components());
        let roots: Vec<&str> = forest.iter().map(|n| n.id()).collect();
        assert_eq!(roots, vec!["s1", "h", "s2", "btn"]);
        assert_eq!(forest[0].children.len(), 1);
    }

    #[test]
    fn test_indent_applied_through_session() {
        let registry = ComponentRegistry::default();
        let settings = EditorSettings::default();
        let mut session = EditorSession::new(outline());

        let action =
            indent_target(session.components(), "s2", &registry, settings.max_nesting_depth)
                .unwrap();
        assert!(session.apply(action, &registry, &settings).is_applied());

        let forest = build_tree(session.components());
        let nested: Vec<&str> = forest[0].children.iter().map(|n| n.id()).collect();
        assert_eq!(nested, vec!["h", "t", "s2"]);
    }
}
