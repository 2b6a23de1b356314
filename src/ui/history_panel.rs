use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{EditorAction, EditorCommand, EditorSession};
use crate::theme;

/// Bottom panel listing undo history, newest first. Clicking an entry restores it.
pub fn history_panel_ui(
    mut contexts: EguiContexts,
    session: Res<EditorSession>,
    mut commands: MessageWriter<EditorCommand>,
) -> Result {
    let history = session.history();
    let current = history.current_index();

    egui::TopBottomPanel::bottom("history_panel")
        .resizable(true)
        .default_height(140.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("History").strong());
                ui.label(
                    egui::RichText::new(format!(
                        "{} undo / {} redo",
                        history.undo_count(),
                        history.redo_count()
                    ))
                    .color(theme::HINT_TEXT)
                    .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                        .clicked()
                    {
                        commands.write(EditorCommand(EditorAction::Redo));
                    }
                    if ui
                        .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                        .clicked()
                    {
                        commands.write(EditorCommand(EditorAction::Undo));
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (index, entry) in history.entries().enumerate().rev() {
                        let is_current = index == current;
                        let mut text =
                            egui::RichText::new(format!("{}  {}", entry.time_label(), entry.label));
                        if is_current {
                            text = text.color(theme::CURRENT_HISTORY_ENTRY).strong();
                        } else if index > current {
                            // Redo side
                            text = text.weak();
                        }
                        if ui.selectable_label(is_current, text).clicked() && !is_current {
                            commands.write(EditorCommand(EditorAction::JumpTo(index)));
                        }
                    }
                });
        });

    Ok(())
}
