//! egui front-end for [`DataTable`].
//!
//! The widget renders a [`TableView`] and feeds user input back into the
//! table. Anything the owning page has to act on (row actions, server page
//! changes, server searches) is returned as [`TableEvent`]s.
//!
//! - `columns`: column widths
//! - `header`: sortable header row
//! - `row`: data rows with per-row actions
//! - `footer`: pagination label and page buttons

pub mod columns;
pub mod footer;
pub mod header;
pub mod row;

use std::path::{Path, PathBuf};

use egui::{Align, Layout, Sense, Ui};
use egui_extras::TableBuilder;
use erpdesk_business::table::{Body, DataTable, NO_DATA_LABEL, TableEvent, TableRecord, TableView};

use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};

/// What happened during one frame of the table.
#[derive(Debug, Default)]
pub struct TableResponse {
    pub events: Vec<TableEvent>,
    /// Set when the Export button was pressed and an export directory was given.
    pub exported: Option<Result<PathBuf, String>>,
}

/// Toolbar, table body and pagination footer.
///
/// Export is offered only when `export_dir` is set; the file is written
/// synchronously from the filtered and sorted rows.
pub fn show_data_table<R: TableRecord>(
    ui: &mut Ui,
    table: &mut DataTable<R>,
    export_dir: Option<&Path>,
) -> TableResponse {
    let mut response = TableResponse::default();
    let view = table.view();

    render_toolbar(ui, table, &view, export_dir, &mut response);
    ui.add_space(6.0);

    let row_clickable = table.options().actions.row_click;
    let mut sort_column = None;

    ui.push_id(("data_table", view.title.as_str()), |ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .vscroll(false)
            .cell_layout(Layout::left_to_right(Align::Center));
        if row_clickable {
            builder = builder.sense(Sense::click());
        }
        for column in table_columns(view.headers.len(), view.has_action_column) {
            builder = builder.column(column);
        }

        builder
            .header(HEADER_HEIGHT, |mut header| {
                sort_column =
                    header::render_table_header(&mut header, &view.headers, view.has_action_column);
            })
            .body(|mut body| {
                if let Body::Rows(rows) = &view.body {
                    for row_view in rows {
                        body.row(ROW_HEIGHT, |mut row| {
                            if let Some(event) = row::render_row(
                                &mut row,
                                row_view,
                                view.has_action_column,
                                row_clickable,
                            ) {
                                response.events.push(event);
                            }
                        });
                    }
                }
            });

        // egui_extras has no colspan; placeholders sit under the header across the full width
        match &view.body {
            Body::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.spinner();
                });
            }
            Body::Empty { .. } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(NO_DATA_LABEL);
                });
            }
            Body::Rows(_) => {}
        }
    });

    if let Some(index) = sort_column
        && let Some(key) = table.columns().iter().nth(index).map(|c| c.key)
    {
        table.sort_by(key);
    }

    ui.add_space(6.0);
    if let Some(page) = footer::render_footer(ui, &view)
        && let Some(event) = table.go_to_page(page)
    {
        response.events.push(event);
    }

    response
}

fn render_toolbar<R: TableRecord>(
    ui: &mut Ui,
    table: &mut DataTable<R>,
    view: &TableView,
    export_dir: Option<&Path>,
    response: &mut TableResponse,
) {
    ui.horizontal(|ui| {
        if !view.title.is_empty() {
            ui.heading(&view.title);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if let Some(dir) = export_dir
                && ui.button("Export").clicked()
            {
                response.exported = Some(table.export_to_dir(dir).map_err(|e| {
                    log::error!("export failed: {e}");
                    e.to_string()
                }));
            }

            if table.options().actions.refresh && ui.button("Refresh").clicked() {
                response.events.extend(table.refresh());
            }

            let mut term = table.search_term().to_owned();
            let edit = ui.add(
                egui::TextEdit::singleline(&mut term)
                    .hint_text("Search...")
                    .desired_width(180.0),
            );
            if edit.changed()
                && let Some(event) = table.search(term)
            {
                response.events.push(event);
            }

            if table.is_loading() {
                ui.spinner();
            }
        });
    });
}
