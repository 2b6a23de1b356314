//! Centralized color theme for the editor UI.
//!
//! Modify values here to change the application's color scheme.

use bevy_egui::egui;

use crate::editor::Severity;
use crate::registry::ComponentCategory;

/// Light grey for label text
pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

/// Grey for help/hint text
pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

/// Red for error messages
pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

/// Amber for repaired-file warnings
pub const WARNING_TEXT: egui::Color32 = egui::Color32::from_rgb(230, 180, 80);

/// Muted gold for locked components in the tree
pub const LOCKED_TEXT: egui::Color32 = egui::Color32::from_rgb(200, 170, 90);

/// Semi-transparent black overlay for modal dialogs
pub const MODAL_OVERLAY: egui::Color32 = egui::Color32::from_black_alpha(100);

/// Highlight for the current entry in the history list
pub const CURRENT_HISTORY_ENTRY: egui::Color32 = egui::Color32::from_rgb(100, 170, 255);

/// Accent stripe color for a toast of the given severity
pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Info => egui::Color32::from_rgb(100, 150, 220),
        Severity::Success => egui::Color32::from_rgb(100, 200, 100),
        Severity::Error => egui::Color32::from_rgb(220, 90, 90),
    }
}

/// Badge color for a library category
pub fn category_color(category: ComponentCategory) -> egui::Color32 {
    match category {
        ComponentCategory::Layout => egui::Color32::from_rgb(80, 140, 200),
        ComponentCategory::Content => egui::Color32::from_rgb(140, 200, 80),
        ComponentCategory::Marketing => egui::Color32::from_rgb(200, 140, 80),
    }
}
