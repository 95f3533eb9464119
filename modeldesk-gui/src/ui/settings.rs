//! Settings dialog.

use eframe::egui::{self, RichText, Rounding, Vec2};
use modeldesk_core::config::API_BASE_URL_ENV;
use modeldesk_core::{RenderMode, Theme};

use crate::app::{apply_theme, ModelDeskApp};
use crate::ui::colors;

/// Active tab in the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Backend,
    Appearance,
}

/// Render the settings dialog.
pub fn render(app: &mut ModelDeskApp, ctx: &egui::Context) {
    let mut save = false;
    let mut cancel = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .default_width(520.0)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            let muted = colors::muted(ui.visuals());

            ui.spacing_mut().item_spacing = Vec2::new(8.0, 12.0);

            // -----------------------------------------------------------------
            // Tabs
            // -----------------------------------------------------------------
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for (tab, label) in [
                    (SettingsTab::Backend, "  Backend  "),
                    (SettingsTab::Appearance, "  Appearance  "),
                ] {
                    let selected = app.settings_tab == tab;
                    let response = ui.selectable_label(selected, RichText::new(label).size(14.0));
                    if response.clicked() {
                        app.settings_tab = tab;
                    }
                }
            });
            ui.separator();

            // -----------------------------------------------------------------
            // Tab content
            // -----------------------------------------------------------------
            match app.settings_tab {
                SettingsTab::Backend => render_backend_tab(app, ui, muted),
                SettingsTab::Appearance => render_appearance_tab(app, ui, ctx, muted),
            }

            // -----------------------------------------------------------------
            // Footer
            // -----------------------------------------------------------------
            ui.add_space(16.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui
                    .add_sized(
                        Vec2::new(100.0, 30.0),
                        egui::Button::new(RichText::new("Save").strong())
                            .fill(colors::PRIMARY)
                            .rounding(Rounding::same(8.0)),
                    )
                    .clicked()
                {
                    save = true;
                }

                if ui
                    .add_sized(
                        Vec2::new(100.0, 30.0),
                        egui::Button::new("Cancel").rounding(Rounding::same(8.0)),
                    )
                    .clicked()
                {
                    cancel = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("v{}", modeldesk_core::VERSION))
                            .size(11.0)
                            .color(muted),
                    );
                });
            });
        });

    if save {
        app.save_settings(ctx);
        app.show_settings = false;
    } else if cancel {
        app.revert_settings(ctx);
        app.show_settings = false;
    }
}

fn render_backend_tab(app: &mut ModelDeskApp, ui: &mut egui::Ui, muted: egui::Color32) {
    ui.heading("Backend");
    ui.separator();

    egui::Grid::new("backend_settings_grid")
        .num_columns(2)
        .spacing([12.0, 10.0])
        .show(ui, |ui| {
            ui.label("Base URL:");
            ui.add(
                egui::TextEdit::singleline(&mut app.settings.api_base_url)
                    .hint_text(modeldesk_core::config::DEFAULT_API_BASE_URL)
                    .desired_width(320.0),
            );
            ui.end_row();

            ui.label("Access token:");
            let mut token = app.settings.api_token.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut token)
                        .password(true)
                        .hint_text("Optional")
                        .desired_width(320.0),
                )
                .changed()
            {
                app.settings.api_token = Some(token);
            }
            ui.end_row();

            ui.label("Timeout:");
            ui.add(
                egui::Slider::new(&mut app.settings.request_timeout_secs, 1..=300)
                    .suffix(" s")
                    .show_value(true),
            );
            ui.end_row();

            ui.label("Rows per page:");
            ui.add(egui::Slider::new(&mut app.settings.page_size, 1..=100).show_value(true));
            ui.end_row();
        });

    ui.label(
        RichText::new(format!(
            "{} overrides the base URL at startup",
            API_BASE_URL_ENV
        ))
        .size(11.0)
        .color(muted)
        .italics(),
    );

    ui.label(
        RichText::new(format!("Settings are stored in {}", app.db.path().display()))
            .size(11.0)
            .color(muted),
    );

    ui.add_space(16.0);

    // Export
    ui.heading("Export");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Folder:");
        let folder = app.settings.resolved_export_dir();
        ui.label(RichText::new(folder.display().to_string()).monospace());
    });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                !app.is_picking_folder(),
                egui::Button::new("Choose...").rounding(Rounding::same(8.0)),
            )
            .clicked()
        {
            app.open_export_dir_dialog();
        }
        if app.is_picking_folder() {
            ui.spinner();
        }
        if app.settings.export_dir.is_some()
            && ui
                .add(egui::Button::new("Use Downloads").rounding(Rounding::same(8.0)))
                .clicked()
        {
            app.settings.export_dir = None;
        }
    });
}

fn render_appearance_tab(
    app: &mut ModelDeskApp,
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    muted: egui::Color32,
) {
    // Theme
    ui.heading("Appearance");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Theme:");
        ui.add_space(8.0);

        for theme in Theme::all() {
            if ui
                .selectable_label(app.settings.theme == *theme, theme.to_string())
                .clicked()
                && app.settings.theme != *theme
            {
                app.settings.theme = *theme;
                apply_theme(ctx, *theme);
            }
        }
    });

    ui.add_space(16.0);

    // Rendering
    ui.heading("Rendering");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Mode:");
        ui.add_space(8.0);

        let is_software = app.settings.render_mode == RenderMode::Software;
        if ui.selectable_label(!is_software, "Auto (GPU)").clicked() && is_software {
            app.settings.render_mode = RenderMode::Auto;
        }
        if ui.selectable_label(is_software, "Software (CPU)").clicked() && !is_software {
            app.settings.render_mode = RenderMode::Software;
        }
    });

    ui.label(
        RichText::new("Software mode uses CPU rendering for VMs without GPU access. Requires restart.")
            .size(11.0)
            .color(muted)
            .italics(),
    );
}
