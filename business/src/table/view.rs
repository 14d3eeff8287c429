//! Render-ready projection of a [`DataTable`].

use super::record::TableRecord;
use super::state::{DataTable, SortDirection};

pub const NO_DATA_LABEL: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub label: String,
    pub sort: Option<SortDirection>,
}

impl HeaderView {
    /// Label with the sort arrow appended when this column is the sort key.
    pub fn text(&self) -> String {
        match self.sort {
            Some(direction) => format!("{} {}", self.label, direction.arrow()),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Index into the table's rows, carried by row events.
    pub index: usize,
    pub cells: Vec<String>,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Loading,
    /// One placeholder row spanning `colspan` columns.
    Empty {
        colspan: usize,
    },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<HeaderView>,
    pub has_action_column: bool,
    pub body: Body,
    pub pagination_label: String,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<R: TableRecord> DataTable<R> {
    pub fn view(&self) -> TableView {
        let options = self.options();
        let actions = options.actions;
        let sort = self.sort();

        let headers = self
            .columns()
            .iter()
            .map(|column| HeaderView {
                label: column.label.clone(),
                sort: sort.filter(|s| s.key == column.key).map(|s| s.direction),
            })
            .collect();

        let body = if self.is_loading() {
            Body::Loading
        } else {
            let rows: Vec<RowView> = self
                .page_rows()
                .into_iter()
                .map(|(index, row)| RowView {
                    index,
                    cells: self.columns().iter().map(|c| c.display(row)).collect(),
                    can_edit: actions.edit && options.can_edit(row),
                    can_delete: actions.delete && options.can_delete(row),
                })
                .collect();
            if rows.is_empty() {
                Body::Empty {
                    colspan: self.columns().len() + usize::from(actions.has_action_column()),
                }
            } else {
                Body::Rows(rows)
            }
        };

        let window = self.window();
        TableView {
            title: options.title.clone(),
            headers,
            has_action_column: actions.has_action_column(),
            body,
            pagination_label: self.pagination_label(),
            page: window.page,
            total_pages: window.total_pages(),
            has_prev: window.has_prev(),
            has_next: window.has_next(),
        }
    }
}
