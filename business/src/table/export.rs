//! Spreadsheet export of the filtered and sorted row set.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

use super::error::TableError;
use super::record::TableRecord;
use super::state::DataTable;
use super::value::CellValue;

pub const SHEET_NAME: &str = "Sheet1";

/// `"Customer Ledger"` → `"Customer_Ledger.xlsx"`.
pub fn export_file_name(title: &str) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "export.xlsx".to_owned()
    } else {
        format!("{stem}.xlsx")
    }
}

impl<R: TableRecord> DataTable<R> {
    /// Every filtered row in sort order, one value per column. Not paginated.
    pub fn export_rows(&self) -> Vec<Vec<CellValue>> {
        self.filtered_rows()
            .map(|row| self.columns().iter().map(|c| c.value(row)).collect())
            .collect()
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(&self.options().title)
    }

    /// Build the `.xlsx` file in memory: a bold header row of column labels,
    /// then one row per record.
    pub fn export_workbook(&self) -> Result<Vec<u8>, TableError> {
        let mut workbook = Workbook::new();
        // Fixed metadata timestamp so unchanged data exports byte-identical.
        let properties = DocProperties::new()
            .set_title(&self.options().title)
            .set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
        workbook.set_properties(&properties);

        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, column) in self.columns().iter().enumerate() {
            sheet.write_string_with_format(0, col_index(col), &column.label, &header)?;
        }

        for (i, values) in self.export_rows().into_iter().enumerate() {
            let row = u32::try_from(i + 1).unwrap_or(u32::MAX);
            for (col, value) in values.into_iter().enumerate() {
                let col = col_index(col);
                match value {
                    CellValue::Empty => {}
                    CellValue::Bool(v) => {
                        sheet.write_boolean(row, col, v)?;
                    }
                    CellValue::Int(v) => {
                        sheet.write_number(row, col, v as f64)?;
                    }
                    CellValue::Float(v) => {
                        sheet.write_number(row, col, v)?;
                    }
                    CellValue::Text(v) => {
                        sheet.write_string(row, col, v)?;
                    }
                    CellValue::Date(v) => {
                        sheet.write_string(row, col, v.format("%Y-%m-%d").to_string())?;
                    }
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Write the export into `dir` and return the file path.
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, TableError> {
        let bytes = self.export_workbook()?;
        let path = dir.join(self.export_file_name());
        std::fs::write(&path, &bytes)?;
        log::info!(
            "exported {} rows to {}",
            self.filtered_count(),
            path.display()
        );
        Ok(path)
    }
}

fn col_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}
