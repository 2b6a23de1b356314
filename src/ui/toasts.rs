use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::Notifications;
use crate::theme;

/// Stacked toasts in the bottom-right corner, newest at the bottom
pub fn toasts_ui(mut contexts: EguiContexts, notifications: Res<Notifications>) -> Result {
    if notifications.is_empty() {
        return Ok(());
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -160.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(contexts.ctx_mut()?, |ui| {
            ui.set_max_width(280.0);
            for queued in notifications.iter() {
                let notice = &queued.notice;
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.5, theme::severity_color(notice.severity)))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&notice.title)
                                .strong()
                                .color(theme::severity_color(notice.severity)),
                        );
                        if !notice.description.is_empty() {
                            ui.label(egui::RichText::new(&notice.description).color(theme::LABEL_TEXT));
                        }
                    });
                ui.add_space(4.0);
            }
        });

    Ok(())
}
