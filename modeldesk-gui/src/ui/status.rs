//! Status bar at the bottom of the window.

use eframe::egui::{self, RichText};

use crate::app::ModelDeskApp;
use crate::ui::colors;

/// Render the status bar.
pub fn render(app: &ModelDeskApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.horizontal(|ui| {
        // Backend in use
        ui.label(
            RichText::new(format!("Backend: {}", app.settings.api_base_url))
                .size(11.0)
                .color(muted),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("v{}", modeldesk_core::VERSION))
                    .size(11.0)
                    .color(muted),
            );
            ui.separator();

            let selected = app.screen.selected().len();
            if selected > 0 {
                ui.label(
                    RichText::new(format!("{} selected", selected))
                        .size(11.0)
                        .color(muted),
                );
                ui.separator();
            }

            ui.label(
                RichText::new(format!("{} records", app.screen.total()))
                    .size(11.0)
                    .color(muted),
            );
        });
    });
}
