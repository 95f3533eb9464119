//! The create/update modal.

use eframe::egui::{self, RichText, Rounding, Vec2};
use modeldesk_core::models::{
    DICT_MODEL_PROVIDER, DICT_MODEL_TYPE, RATIO_RANGE, RATIO_STEP, RESPONSE_LIMIT_RANGE,
};
use modeldesk_core::{Field, ModelForm};

use crate::app::ModelDeskApp;
use crate::ui::{colors, dictionary_select};

const INPUT_WIDTH: f32 = 320.0;

/// Render the editor window.
pub fn render(app: &mut ModelDeskApp, ctx: &egui::Context) {
    let title = app.screen.form().title();
    let confirm_label = app.screen.form().confirm_label();
    let saving = app.screen.is_saving();

    let mut submit = false;
    let mut cancel = false;

    egui::Window::new(title)
        .id(egui::Id::new("model_editor"))
        .collapsible(false)
        .resizable(false)
        .default_width(560.0)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            let muted = colors::muted(ui.visuals());
            let providers = app.screen.dictionary(DICT_MODEL_PROVIDER).to_vec();
            let types = app.screen.dictionary(DICT_MODEL_TYPE).to_vec();
            let form = app.screen.form_mut();

            egui::Grid::new("model_editor_grid")
                .num_columns(2)
                .spacing([16.0, 10.0])
                .show(ui, |ui| {
                    for field in Field::ALL {
                        field_label(ui, field);
                        ui.vertical(|ui| {
                            let changed = match field {
                                Field::Supplier => dictionary_select(
                                    ui,
                                    "editor_supplier",
                                    &providers,
                                    &mut form.values.model_supplier,
                                    None,
                                    INPUT_WIDTH,
                                ),
                                Field::ModelType => dictionary_select(
                                    ui,
                                    "editor_model_type",
                                    &types,
                                    &mut form.values.model_type,
                                    None,
                                    INPUT_WIDTH,
                                ),
                                Field::ResponseLimit => ui
                                    .add(
                                        egui::Slider::new(
                                            &mut form.values.response_limit,
                                            RESPONSE_LIMIT_RANGE,
                                        )
                                        .step_by(1.0),
                                    )
                                    .changed(),
                                Field::Temperature => ui
                                    .add(ratio_slider(&mut form.values.temperature))
                                    .changed(),
                                Field::TopP => {
                                    ui.add(ratio_slider(&mut form.values.top_p)).changed()
                                }
                                _ => text_input(ui, form, field),
                            };
                            if changed {
                                form.field_edited(field);
                            }

                            if let Some(err) = form.error(field) {
                                ui.label(
                                    RichText::new(err.to_string())
                                        .color(colors::ERROR)
                                        .size(11.0),
                                );
                            } else if let Some(help) = field.help() {
                                ui.label(RichText::new(help).color(muted).size(11.0));
                            }
                        });
                        ui.end_row();
                    }
                });

            ui.add_space(12.0);
            ui.separator();

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let confirm = ui.add_enabled(
                        !saving,
                        egui::Button::new(RichText::new(confirm_label).strong())
                            .fill(colors::PRIMARY)
                            .rounding(Rounding::same(8.0))
                            .min_size(Vec2::new(90.0, 30.0)),
                    );
                    if confirm.clicked() {
                        submit = true;
                    }

                    if ui
                        .add_enabled(
                            !saving,
                            egui::Button::new("Cancel")
                                .rounding(Rounding::same(8.0))
                                .min_size(Vec2::new(90.0, 30.0)),
                        )
                        .clicked()
                    {
                        cancel = true;
                    }

                    if saving {
                        ui.spinner();
                    }
                });
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && !saving {
        cancel = true;
    }

    if cancel {
        app.screen.cancel_editor();
    } else if submit {
        let command = app.screen.submit();
        app.dispatch(ctx, command);
    }
}

fn field_label(ui: &mut egui::Ui, field: Field) {
    ui.horizontal(|ui| {
        if field.is_required() {
            ui.label(RichText::new("*").color(colors::ERROR));
        }
        ui.label(field.label());
    });
}

fn text_input(ui: &mut egui::Ui, form: &mut ModelForm, field: Field) -> bool {
    let Some(value) = form.text_mut(field) else {
        return false;
    };

    let edit = match field {
        Field::ExtData => egui::TextEdit::multiline(value)
            .code_editor()
            .desired_rows(4)
            .hint_text("{}"),
        Field::ApiKey => egui::TextEdit::singleline(value).password(true),
        _ => egui::TextEdit::singleline(value),
    };

    ui.add(edit.desired_width(INPUT_WIDTH)).changed()
}

fn ratio_slider(value: &mut f64) -> egui::Slider<'_> {
    egui::Slider::new(value, RATIO_RANGE)
        .step_by(RATIO_STEP)
        .fixed_decimals(1)
}
