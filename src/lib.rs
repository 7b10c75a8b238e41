//! # Sheet Stats
//!
//! Reads the first sheet of a legacy binary Excel workbook, samples a
//! user-specified rectangle of it, and reports per-column descriptive
//! statistics (mean, sample variance, sample standard deviation).
//!
//! The crate is the computational core behind a thin presentation shell: the
//! shell supplies a file path plus two free-form range strings and receives
//! a rendered report (also written next to the workbook) or a single typed
//! error to display.
//!
//! ## Range strings
//!
//! - Column range: comma-separated 0-based column indices, e.g. `0,1,3`.
//!   Empty selects columns `2,3,4`.
//! - Row range: `<start>-<end>` with an exclusive end, where `<end>` may be
//!   the literal `END` for "through the last row". Empty selects `1-END`,
//!   skipping the header row.
//!
//! ```no_run
//! # fn run() -> Result<(), sheet_stats::SheetStatsError> {
//! let analysis = sheet_stats::analyze_file("scores.xls", "2,3,4", "1-END")?;
//! print!("{}", analysis.report);
//! # Ok(())
//! # }
//! ```

mod error;
mod range;
mod report;
mod spreadsheet;
mod stats;

pub use crate::error::SheetStatsError;
pub use crate::range::{ColumnSelection, RangeSpec, RowBound, RowInterval, DEFAULT_COLUMNS};
pub use crate::report::{ColumnStats, Report};
pub use crate::spreadsheet::{TabularSource, XlsSource};
pub use crate::stats::extract;

use log::warn;
use std::path::{Path, PathBuf};

/// Outcome of a full analysis run.
#[derive(Debug)]
pub struct Analysis {
    /// Rendered report text, one block per selected column.
    pub report: String,
    /// Where the report copy landed, or why writing it failed. A failed
    /// write does not invalidate the report.
    pub saved_to: Result<PathBuf, SheetStatsError>,
}

/// Runs the whole pipeline once: parse the range strings, open the
/// workbook's first sheet, extract column statistics, render the report,
/// and save a copy next to the workbook.
///
/// Every failure except the report write fails the invocation; a failed
/// write is carried in [`Analysis::saved_to`] with the report intact.
pub fn analyze_file<P: AsRef<Path>>(
    path: P,
    columns_text: &str,
    rows_text: &str,
) -> Result<Analysis, SheetStatsError> {
    let path = path.as_ref();
    let spec = RangeSpec::parse(columns_text, rows_text)?;
    let source = XlsSource::open(path)?;
    let report = extract(&source, &spec)?;
    let saved_to = report.save_beside(path);
    if let Err(error) = &saved_to {
        warn!("{error}");
    }
    Ok(Analysis {
        report: report.to_string(),
        saved_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_errors_win_before_the_file_is_touched() {
        let error = analyze_file("no_such_workbook.xls", "2,x,4", "").unwrap_err();

        assert!(matches!(error, SheetStatsError::ColumnRange { .. }));
    }

    #[test]
    fn missing_workbook_is_a_read_error() {
        let error = analyze_file("no_such_workbook.xls", "", "").unwrap_err();

        assert!(matches!(error, SheetStatsError::SourceRead { .. }));
    }

    #[test]
    fn unknown_extension_is_a_format_error() {
        let error = analyze_file("notes.csv", "", "").unwrap_err();

        assert!(matches!(error, SheetStatsError::InvalidFileFormat { .. }));
    }
}
