use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    #[error("failed to build spreadsheet: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
