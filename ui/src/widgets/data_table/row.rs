//! Body rows.

use egui::{Button, Stroke, Ui};
use egui_extras::TableRow;
use erpdesk_business::table::{RowView, TableEvent};

/// Renders one data row. Edit/delete stay visible but disabled when the row
/// is not eligible, so the columns never shift.
#[inline]
pub fn render_row(
    row: &mut TableRow<'_, '_>,
    view: &RowView,
    has_action_column: bool,
    row_clickable: bool,
) -> Option<TableEvent> {
    let mut event = None;

    for cell in &view.cells {
        row.col(|ui| {
            ui.label(cell);
            draw_cell_bottom_border(ui);
        });
    }

    if has_action_column {
        row.col(|ui| {
            ui.horizontal(|ui| {
                if ui.add_enabled(view.can_edit, Button::new("Edit")).clicked() {
                    event = Some(TableEvent::Edit(view.index));
                }
                if ui
                    .add_enabled(view.can_delete, Button::new("Delete"))
                    .clicked()
                {
                    event = Some(TableEvent::Delete(view.index));
                }
            });
        });
    }

    // a button click wins over the row click underneath it
    if event.is_none() && row_clickable && row.response().clicked() {
        event = Some(TableEvent::RowClick(view.index));
    }
    event
}

#[inline]
fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
