//! Search form and listing actions above the table.

use eframe::egui::{self, RichText, Rounding, Vec2};
use modeldesk_core::models::{DICT_MODEL_PROVIDER, DICT_MODEL_TYPE};

use crate::app::ModelDeskApp;
use crate::ui::{colors, dictionary_select};

const FILTER_WIDTH: f32 = 150.0;

/// Render the search form and the add/delete/export buttons.
pub fn render(app: &mut ModelDeskApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    ui.add_space(6.0);

    // -------------------------------------------------------------------------
    // Search form
    // -------------------------------------------------------------------------
    let providers = app.screen.dictionary(DICT_MODEL_PROVIDER).to_vec();
    let types = app.screen.dictionary(DICT_MODEL_TYPE).to_vec();
    let mut submit = false;

    ui.horizontal_wrapped(|ui| {
        let filter = app.screen.filter_draft_mut();

        ui.label("Supplier");
        dictionary_select(
            ui,
            "filter_supplier",
            &providers,
            &mut filter.model_supplier,
            Some("All"),
            FILTER_WIDTH,
        );

        ui.label("Model type");
        dictionary_select(
            ui,
            "filter_model_type",
            &types,
            &mut filter.model_type,
            Some("All"),
            FILTER_WIDTH,
        );

        for (label, value) in [("Model", &mut filter.model), ("Alias", &mut filter.alias)] {
            ui.label(label);
            let response = ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(format!("Search {}", label.to_lowercase()))
                    .desired_width(FILTER_WIDTH),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
        }

        ui.add_space(8.0);
        if ui
            .add(
                egui::Button::new(RichText::new("Search").strong())
                    .fill(colors::PRIMARY)
                    .rounding(Rounding::same(6.0)),
            )
            .clicked()
        {
            submit = true;
        }
        if ui
            .add(egui::Button::new("Reset").rounding(Rounding::same(6.0)))
            .clicked()
        {
            let command = app.screen.reset_filter();
            app.dispatch(ctx, [command]);
        }
    });

    if submit {
        let command = app.screen.search();
        app.dispatch(ctx, [command]);
    }

    ui.add_space(4.0);
    ui.separator();

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------
    ui.horizontal(|ui| {
        let button_size = Vec2::new(96.0, 28.0);

        if ui
            .add_sized(
                button_size,
                egui::Button::new(RichText::new("+ Add").strong())
                    .fill(colors::PRIMARY)
                    .rounding(Rounding::same(6.0)),
            )
            .clicked()
        {
            app.screen.add();
        }

        let has_selection = !app.screen.selected().is_empty();
        if ui
            .add_enabled(
                has_selection,
                egui::Button::new(RichText::new("Delete").color(colors::ERROR))
                    .min_size(button_size)
                    .rounding(Rounding::same(6.0)),
            )
            .on_disabled_hover_text("Select rows to delete")
            .clicked()
        {
            app.screen.request_delete_selected();
        }

        if ui
            .add_enabled(
                !app.screen.is_exporting(),
                egui::Button::new("Export")
                    .min_size(button_size)
                    .rounding(Rounding::same(6.0)),
            )
            .clicked()
        {
            app.screen.request_export();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!app.screen.is_loading(), egui::Button::new("Refresh"))
                .clicked()
            {
                let command = app.screen.reload();
                app.dispatch(ctx, [command]);
            }
        });
    });

    ui.add_space(6.0);
}
