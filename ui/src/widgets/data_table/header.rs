//! Sortable header row.

use egui::{Button, RichText, Ui};
use egui_extras::TableRow;
use erpdesk_business::table::HeaderView;

/// Renders the header; returns the index of a clicked column.
#[inline]
pub fn render_table_header(
    header: &mut TableRow<'_, '_>,
    headers: &[HeaderView],
    has_action_column: bool,
) -> Option<usize> {
    let mut clicked = None;
    for (index, column) in headers.iter().enumerate() {
        header.col(|ui| {
            if render_header_cell(ui, &column.text()) {
                clicked = Some(index);
            }
        });
    }
    if has_action_column {
        header.col(|ui| {
            ui.strong("Actions");
        });
    }
    clicked
}

#[inline]
fn render_header_cell(ui: &mut Ui, text: &str) -> bool {
    ui.add(Button::new(RichText::new(text).strong()).frame(false))
        .on_hover_text("Sort")
        .clicked()
}
