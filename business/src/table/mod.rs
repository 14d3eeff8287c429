//! Generic data table: search, sort, pagination, export and row actions for
//! any [`TableRecord`] type.
//!
//! Two modes share one API. A client-paginated table holds every row and
//! does all the work locally. A server-paginated table holds only the
//! current page and reports page changes and searches as [`TableEvent`]s.

mod column;
mod error;
mod export;
mod pagination;
mod record;
mod state;
mod value;
mod view;

pub use column::{Column, Columns, Renderer};
pub use error::TableError;
pub use export::{SHEET_NAME, export_file_name};
pub use pagination::PageWindow;
pub use record::{JsonRecord, TableRecord};
pub use state::{
    DataTable, RowActions, RowPredicate, SortDirection, SortState, TableEvent, TableMode,
    TableOptions,
};
pub use value::CellValue;
pub use view::{Body, HeaderView, NO_DATA_LABEL, RowView, TableView};
