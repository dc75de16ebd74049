use std::path::PathBuf;

/// Errors raised while loading, persisting or exporting the table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed table at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Invalid id counter in {}: '{value}'", path.display())]
    Counter { path: PathBuf, value: String },

    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] zip::result::ZipError),

    #[error("Field '{0}' cannot be edited")]
    ReadOnlyField(&'static str),
}
