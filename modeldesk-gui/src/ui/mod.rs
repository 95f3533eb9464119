//! UI components for Modeldesk.

pub mod confirm;
pub mod editor;
pub mod menu;
pub mod notices;
pub mod settings;
pub mod status;
pub mod table;
pub mod toolbar;

use eframe::egui;
use modeldesk_core::DictionaryOption;

// Theme-aware colors for the UI
pub mod colors {
    use eframe::egui::{Color32, Visuals};

    /// Primary action color (same for both themes)
    pub const PRIMARY: Color32 = Color32::from_rgb(59, 130, 246); // Blue

    /// Success green
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);

    /// Error red
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

    /// Get muted text color based on theme
    pub fn muted(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(156, 163, 175)
        } else {
            Color32::from_rgb(100, 100, 110)
        }
    }

    /// Get notice background based on theme
    pub fn notice_bg(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(45, 45, 50)
        } else {
            Color32::from_rgb(250, 250, 252)
        }
    }
}

/// A select backed by dictionary options. Returns true when the value changed.
///
/// `empty_label` adds a leading option that clears the value.
pub fn dictionary_select(
    ui: &mut egui::Ui,
    id_salt: &str,
    options: &[DictionaryOption],
    value: &mut String,
    empty_label: Option<&str>,
    width: f32,
) -> bool {
    let selected_text = options
        .iter()
        .find(|o| &o.value == value)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| {
            if value.is_empty() {
                empty_label.unwrap_or("Select...").to_string()
            } else {
                value.clone()
            }
        });

    let mut changed = false;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected_text)
        .width(width)
        .show_ui(ui, |ui| {
            if let Some(label) = empty_label {
                if ui.selectable_label(value.is_empty(), label).clicked() && !value.is_empty() {
                    value.clear();
                    changed = true;
                }
            }
            if options.is_empty() {
                ui.label(
                    egui::RichText::new("No options loaded")
                        .color(colors::muted(ui.visuals()))
                        .italics(),
                );
            }
            for option in options {
                let is_selected = &option.value == value;
                if ui.selectable_label(is_selected, &option.label).clicked() && !is_selected {
                    *value = option.value.clone();
                    changed = true;
                }
            }
        });
    changed
}
