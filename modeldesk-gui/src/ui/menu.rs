//! Top menu bar.

use eframe::egui::{self, RichText};
use modeldesk_core::{Notice, Theme};

use crate::app::ModelDeskApp;
use crate::ui::colors;

/// Render the top menu bar.
pub fn render(app: &mut ModelDeskApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    let modal_open = app.modal_open();

    egui::menu::bar(ui, |ui| {
        // App title
        ui.label(RichText::new("Modeldesk").strong().size(15.0));
        ui.separator();

        // File menu
        ui.menu_button("File", |ui| {
            if ui.button("Refresh").clicked() {
                let command = app.screen.reload();
                app.dispatch(ctx, [command]);
                ui.close_menu();
            }

            if ui
                .add_enabled(
                    !modal_open && !app.screen.is_exporting(),
                    egui::Button::new("Export..."),
                )
                .clicked()
            {
                app.screen.request_export();
                ui.close_menu();
            }

            ui.separator();

            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        // Edit menu
        ui.menu_button("Edit", |ui| {
            if ui
                .add_enabled(!modal_open, egui::Button::new("Add Model"))
                .clicked()
            {
                app.screen.add();
                ui.close_menu();
            }

            if ui.button("Settings...").clicked() {
                app.show_settings = true;
                ui.close_menu();
            }
        });

        // View menu
        ui.menu_button("View", |ui| {
            let dark_mode = app.settings.theme == Theme::Dark;
            if ui.checkbox(&mut { dark_mode }, "Dark Mode").changed() {
                let theme = if dark_mode { Theme::Light } else { Theme::Dark };
                app.set_theme(ctx, theme);
            }
        });

        // Help menu
        ui.menu_button("Help", |ui| {
            if ui.button("About").clicked() {
                app.screen.push_notice(Notice::info(format!(
                    "Modeldesk v{}",
                    modeldesk_core::VERSION
                )));
                ui.close_menu();
            }
        });

        // Right-aligned activity indicator
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let activity = if app.screen.is_saving() {
                Some("Saving...")
            } else if app.screen.is_exporting() {
                Some("Exporting...")
            } else if app.screen.fetching().is_some() {
                Some("Opening record...")
            } else if app.screen.is_loading() {
                Some("Loading...")
            } else {
                None
            };

            if let Some(text) = activity {
                ui.label(RichText::new(text).color(colors::PRIMARY).size(12.0));
                ui.spinner();
            }
        });
    });
}
