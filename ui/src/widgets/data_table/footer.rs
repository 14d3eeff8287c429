//! Pagination footer: "Showing x to y of z entries" plus page controls.

use egui::Ui;
use erpdesk_business::table::TableView;

/// Renders the footer; returns the page the user asked for.
#[inline]
pub fn render_footer(ui: &mut Ui, view: &TableView) -> Option<usize> {
    let mut target = None;
    ui.horizontal(|ui| {
        ui.label(&view.pagination_label);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add_enabled(view.has_next, egui::Button::new("Next")).clicked() {
                target = Some(view.page + 1);
            }
            ui.label(format!("Page {} of {}", view.page, view.total_pages.max(1)));
            if ui
                .add_enabled(view.has_prev, egui::Button::new("Previous"))
                .clicked()
            {
                target = Some(view.page.saturating_sub(1));
            }
        });
    });
    target
}
