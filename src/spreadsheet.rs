//! Tabular data sources backed by spreadsheet files.
//!
//! The extractor only needs a grid it can probe cell by cell, so the source
//! is a small trait; the one production implementation reads the first sheet
//! of a legacy binary Excel workbook.

use crate::error::SheetStatsError;
use calamine::{open_workbook, Data, Range, Reader, Xls};
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A readable grid of cells the statistics extractor samples from.
pub trait TabularSource {
    /// Total number of rows physically present in the sheet, used to resolve
    /// an open-ended row interval.
    fn physical_row_count(&self) -> usize;

    /// Cell at an absolute (row, column) position, if one exists.
    fn cell(&self, row: usize, col: usize) -> Option<&Data>;
}

impl TabularSource for Range<Data> {
    fn physical_row_count(&self) -> usize {
        self.end().map_or(0, |(row, _)| row as usize + 1)
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.get_value((row as u32, col as u32))
    }
}

/// First sheet of a legacy binary Excel workbook (.xls, .xla), materialized
/// in memory. The file handle is closed as soon as the sheet is loaded.
#[derive(Debug)]
pub struct XlsSource {
    path: PathBuf,
    sheet_name: String,
    range: Range<Data>,
}

impl XlsSource {
    /// Opens a workbook and loads its first sheet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<XlsSource, SheetStatsError> {
        let path = path.as_ref();
        match path.extension().and_then(OsStr::to_str) {
            Some("xls") | Some("xla") => (),
            _ => {
                return Err(SheetStatsError::InvalidFileFormat {
                    name: path.display().to_string(),
                })
            }
        }

        let mut workbook: Xls<_> = open_workbook(path).map_err(|source| {
            SheetStatsError::SourceRead {
                name: path.display().to_string(),
                source,
            }
        })?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(SheetStatsError::SheetNotFound)?;
        let range = workbook.worksheet_range(&sheet_name).map_err(|source| {
            SheetStatsError::SourceRead {
                name: path.display().to_string(),
                source,
            }
        })?;
        debug!(
            "opened '{}' sheet '{}' with {} rows",
            path.display(),
            sheet_name,
            range.physical_row_count(),
        );

        Ok(XlsSource {
            path: path.to_path_buf(),
            sheet_name,
            range,
        })
    }

    /// Path the workbook was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the loaded sheet.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl TabularSource for XlsSource {
    fn physical_row_count(&self) -> usize {
        self.range.physical_row_count()
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.range.cell(row, col)
    }
}

/// Convert 0-based row & column indices to an Excel-style cell position.
pub(crate) fn cell_position(row: usize, column: usize) -> String {
    let row = (row + 1).to_string();
    let mut column: u32 = column as u32 + 1;
    let mut position = String::from("");
    while column > 0 {
        column -= 1;
        let digit = char::from_u32(65 + column % 26).expect("Hardcode letters");
        column /= 26;
        position.insert(0, digit)
    }
    position.push_str(row.as_str());
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_positions() {
        assert_eq!(cell_position(0, 0), "A1");
        assert_eq!(cell_position(1, 2), "C2");
        assert_eq!(cell_position(9, 25), "Z10");
        assert_eq!(cell_position(0, 26), "AA1");
    }

    #[test]
    fn range_source_bounds() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Label".to_owned()));
        range.set_value((2, 1), Data::Float(1.5));

        assert_eq!(range.physical_row_count(), 3);
        assert_eq!(range.cell(2, 1), Some(&Data::Float(1.5)));
        assert_eq!(range.cell(1, 1), Some(&Data::Empty));
        assert_eq!(range.cell(5, 0), None);
    }

    #[test]
    fn open_rejects_unknown_extension() {
        let error = XlsSource::open("report.txt").unwrap_err();

        assert!(matches!(error, SheetStatsError::InvalidFileFormat { .. }));
    }

    #[test]
    fn open_fails_on_missing_file() {
        let error = XlsSource::open("no_such_workbook.xls").unwrap_err();

        assert!(matches!(error, SheetStatsError::SourceRead { .. }));
    }
}
