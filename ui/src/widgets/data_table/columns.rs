//! Column layout for the data table.

use egui_extras::Column;

pub const ACTIONS_WIDTH: f32 = 140.0;
pub const ROW_HEIGHT: f32 = 28.0;
pub const HEADER_HEIGHT: f32 = 26.0;
pub const MIN_COLUMN_WIDTH: f32 = 80.0;

/// One flexible column per data column, then a fixed actions column.
#[inline]
pub fn table_columns(data_columns: usize, has_actions: bool) -> Vec<Column> {
    let mut columns: Vec<Column> = (0..data_columns)
        .map(|_| Column::remainder().at_least(MIN_COLUMN_WIDTH).clip(true))
        .collect();
    if has_actions {
        columns.push(Column::exact(ACTIONS_WIDTH));
    }
    columns
}
