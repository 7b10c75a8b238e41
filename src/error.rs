use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the sheet-stats crate.
/// One variant per failure kind the analysis can surface; the presentation
/// shell shows a single message per invocation.
#[derive(Error, Debug)]
pub enum SheetStatsError {
    /// A column-list token is not a non-negative integer.
    #[error("Invalid column '{token}' in column range '{input}'")]
    ColumnRange { input: String, token: String },

    /// A row-interval string does not match `<start>-<end>` or `<start>-END`.
    #[error("Invalid row range '{0}', expected '<start>-<end>' or '<start>-END'")]
    RowRange(String),

    /// Unsupported or unrecognized file format.
    #[error("Cannot detect file format for '{name}'")]
    InvalidFileFormat { name: String },

    /// The workbook cannot be opened or its first sheet cannot be read.
    #[error("Cannot read spreadsheet '{name}': {source}")]
    SourceRead {
        name: String,
        #[source]
        source: calamine::XlsError,
    },

    /// The workbook contains no sheets at all.
    #[error("Sheet not found or spreadsheet is empty")]
    SheetNotFound,

    /// The probe cell fixes a whole column's representation; this one was
    /// neither numeric nor text.
    #[error("Cell {position} is neither numeric nor text ({found})")]
    CellType { position: String, found: String },

    /// A data cell cannot be read under the representation the probe cell
    /// committed the column to.
    #[error("Invalid cell value at '{position}': {message}")]
    CellValue { position: String, message: String },

    /// The report file could not be written. The in-memory report survives.
    #[error("Cannot write report to '{path}': {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
