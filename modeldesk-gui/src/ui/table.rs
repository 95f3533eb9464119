//! The paginated record listing.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};
use modeldesk_core::models::{DICT_MODEL_PROVIDER, DICT_MODEL_TYPE};
use modeldesk_core::ModelId;

use crate::app::ModelDeskApp;
use crate::ui::colors;

const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];
const ROW_HEIGHT: f32 = 28.0;

/// A row interaction, applied after the table is drawn.
enum RowAction {
    Toggle(ModelId),
    SelectAll(bool),
    Edit(ModelId),
    Delete(ModelId),
}

/// Render the listing table and the pagination bar.
pub fn render(app: &mut ModelDeskApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    let muted = colors::muted(ui.visuals());
    let mut actions = Vec::new();

    let pagination_height = 36.0;
    let table_height = (ui.available_height() - pagination_height).max(120.0);

    ui.allocate_ui(egui::vec2(ui.available_width(), table_height), |ui| {
        let screen = &app.screen;
        let fetching = screen.fetching();

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(28.0))
            .column(Column::initial(160.0).at_least(80.0))
            .column(Column::initial(140.0).at_least(80.0))
            .column(Column::initial(220.0).at_least(100.0))
            .column(Column::initial(200.0).at_least(100.0))
            .column(Column::remainder().at_least(120.0))
            .min_scrolled_height(0.0)
            .max_scroll_height(table_height)
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    let mut all = screen.all_selected();
                    if ui.checkbox(&mut all, "").changed() {
                        actions.push(RowAction::SelectAll(all));
                    }
                });
                for title in ["Supplier", "Model type", "Model", "Alias", "Operation"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for record in screen.records() {
                    let id = record.model_id;
                    body.row(ROW_HEIGHT, |mut row| {
                        row.set_selected(screen.is_selected(id));

                        row.col(|ui| {
                            let mut checked = screen.is_selected(id);
                            if ui.checkbox(&mut checked, "").changed() {
                                actions.push(RowAction::Toggle(id));
                            }
                        });
                        row.col(|ui| {
                            ui.label(
                                screen.dictionary_label(DICT_MODEL_PROVIDER, &record.model_supplier),
                            );
                        });
                        row.col(|ui| {
                            ui.label(screen.dictionary_label(DICT_MODEL_TYPE, &record.model_type));
                        });
                        row.col(|ui| {
                            ui.label(&record.model);
                        });
                        row.col(|ui| {
                            ui.label(&record.alias);
                        });
                        row.col(|ui| {
                            if fetching == Some(id) {
                                ui.spinner();
                            } else if ui.link("Edit").clicked() {
                                actions.push(RowAction::Edit(id));
                            }
                            if ui
                                .link(RichText::new("Delete").color(colors::ERROR))
                                .clicked()
                            {
                                actions.push(RowAction::Delete(id));
                            }
                        });
                    });
                }
            });

        if screen.records().is_empty() {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                let text = if screen.is_loading() {
                    "Loading..."
                } else {
                    "No data"
                };
                ui.label(RichText::new(text).color(muted).italics());
            });
        }
    });

    for action in actions {
        match action {
            RowAction::Toggle(id) => app.screen.toggle_selected(id),
            RowAction::SelectAll(selected) => app.screen.set_all_selected(selected),
            RowAction::Edit(id) => {
                let command = app.screen.edit(id);
                app.dispatch(ctx, command);
            }
            RowAction::Delete(id) => app.screen.request_delete(id),
        }
    }

    ui.separator();
    render_pagination(app, ui, ctx);
}

fn render_pagination(app: &mut ModelDeskApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    let muted = colors::muted(ui.visuals());
    let current = app.screen.query().current;
    let pages = app.screen.page_count();
    let page_size = app.screen.query().page_size;

    let mut target_page = None;
    let mut target_size = None;

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        egui::ComboBox::from_id_salt("page_size")
            .selected_text(format!("{} / page", page_size))
            .width(100.0)
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    if ui
                        .selectable_label(size == page_size, format!("{} / page", size))
                        .clicked()
                    {
                        target_size = Some(size);
                    }
                }
            });

        if ui
            .add_enabled(current < pages, egui::Button::new(">"))
            .clicked()
        {
            target_page = Some(current + 1);
        }
        ui.label(format!("{} / {}", current, pages));
        if ui
            .add_enabled(current > 1, egui::Button::new("<"))
            .clicked()
        {
            target_page = Some(current - 1);
        }

        ui.label(
            RichText::new(format!("Total {}", app.screen.total()))
                .color(muted)
                .size(12.0),
        );
    });

    if let Some(page) = target_page {
        let command = app.screen.go_to_page(page);
        app.dispatch(ctx, command);
    }
    if let Some(size) = target_size {
        let command = app.screen.set_page_size(size);
        app.dispatch(ctx, command);
    }
}
