//! Confirmation dialog for delete and export.

use eframe::egui::{self, RichText, Rounding, Vec2};
use modeldesk_core::PendingConfirm;

use crate::app::ModelDeskApp;
use crate::ui::colors;

/// Render the pending confirmation, if any.
pub fn render(app: &mut ModelDeskApp, ctx: &egui::Context) {
    let Some(pending) = app.screen.pending_confirm() else {
        return;
    };
    let prompt = pending.prompt();
    let destructive = !matches!(pending, PendingConfirm::Export(_));
    let detail = match pending {
        PendingConfirm::DeleteMany(ids) if ids.len() > 1 => Some(format!("{} records", ids.len())),
        _ => None,
    };

    let mut accepted = false;
    let mut cancelled = false;

    egui::Window::new("Confirm")
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new(prompt).size(14.0));
            if let Some(detail) = &detail {
                ui.label(
                    RichText::new(detail)
                        .size(11.0)
                        .color(colors::muted(ui.visuals())),
                );
            }
            ui.add_space(12.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let fill = if destructive {
                    colors::ERROR
                } else {
                    colors::PRIMARY
                };
                if ui
                    .add(
                        egui::Button::new(RichText::new("OK").strong())
                            .fill(fill)
                            .rounding(Rounding::same(8.0))
                            .min_size(Vec2::new(72.0, 28.0)),
                    )
                    .clicked()
                {
                    accepted = true;
                }
                if ui
                    .add(
                        egui::Button::new("Cancel")
                            .rounding(Rounding::same(8.0))
                            .min_size(Vec2::new(72.0, 28.0)),
                    )
                    .clicked()
                {
                    cancelled = true;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        cancelled = true;
    }

    if accepted {
        let command = app.screen.confirm();
        app.dispatch(ctx, command);
    } else if cancelled {
        app.screen.cancel_confirm();
    }
}
