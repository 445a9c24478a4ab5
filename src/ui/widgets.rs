// DoseWatch - ui/widgets.rs
//
// Small reusable widgets: status badge and supply gauge.

use crate::core::model::ExecutionStatus;
use crate::core::supply::SupplyGauge;
use crate::ui::theme;

/// Coloured pill showing an execution status label.
pub fn status_badge(ui: &mut egui::Ui, status: ExecutionStatus, dark_mode: bool) -> egui::Response {
    ui.label(
        egui::RichText::new(format!(" {} ", status.label()))
            .small()
            .strong()
            .color(theme::status_colour(status, dark_mode))
            .background_color(theme::status_bg_colour(status)),
    )
}

/// Horizontal bar filled to the remaining-supply fraction, with caption.
pub fn supply_gauge(ui: &mut egui::Ui, gauge: &SupplyGauge, width: f32, dark_mode: bool) {
    ui.vertical(|ui| {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(width, theme::GAUGE_HEIGHT),
            egui::Sense::hover(),
        );
        let painter = ui.painter();
        painter.rect_filled(rect, 3.0, theme::gauge_track_colour(dark_mode));

        let fill_width = rect.width() * gauge.fraction();
        if fill_width > 0.0 {
            let fill = egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, rect.height()));
            painter.rect_filled(fill, 3.0, theme::gauge_colour(gauge.low_stock));
        }
        response.on_hover_text(format!("{:.0}% remaining", gauge.percent));

        let caption = egui::RichText::new(format!("{} tablets", gauge.caption())).small();
        if gauge.low_stock {
            ui.label(caption.color(theme::gauge_colour(true)));
        } else {
            ui.label(caption.weak());
        }
    });
}
