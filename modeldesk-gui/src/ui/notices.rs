//! Transient notices in the bottom-right corner.

use eframe::egui::{self, RichText, Rounding};
use modeldesk_core::NoticeKind;

use crate::app::ModelDeskApp;
use crate::ui::colors;

/// Render active notices; clicking one dismisses it.
pub fn render(app: &mut ModelDeskApp, ctx: &egui::Context) {
    if app.screen.notices().is_empty() {
        return;
    }

    let mut dismissed = None;

    egui::Area::new(egui::Id::new("notices"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -36.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let visuals = ui.visuals().clone();
            for (index, notice) in app.screen.notices().iter().enumerate() {
                let accent = match notice.kind {
                    NoticeKind::Success => colors::SUCCESS,
                    NoticeKind::Info => colors::PRIMARY,
                    NoticeKind::Error => colors::ERROR,
                };

                let response = egui::Frame::none()
                    .fill(colors::notice_bg(&visuals))
                    .stroke(egui::Stroke::new(1.0, accent))
                    .rounding(Rounding::same(8.0))
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                    .show(ui, |ui| {
                        ui.set_max_width(360.0);
                        ui.label(RichText::new(&notice.text).color(accent));
                    })
                    .response
                    .interact(egui::Sense::click());

                if response.clicked() {
                    dismissed = Some(index);
                }
                ui.add_space(6.0);
            }
        });

    if let Some(index) = dismissed {
        app.screen.dismiss_notice(index);
    }
}
