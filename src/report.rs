//! Report assembly and persistence.

use crate::error::SheetStatsError;
use log::debug;
use std::fmt;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the source file name for the saved report copy.
const REPORT_SUFFIX: &str = "-stats";

/// Descriptive statistics for one selected column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnStats {
    /// Column index (0-based), as the user requested it
    pub column: usize,
    /// Header label from row 0
    pub label: String,
    pub mean: f64,
    pub variance: f64,
    pub stddev: f64,
}

/// The rendered analysis result: one block per selected column, in request
/// order, never sorted.
#[derive(Clone, Debug)]
pub struct Report {
    blocks: Vec<ColumnStats>,
}

impl Report {
    pub(crate) fn new(blocks: Vec<ColumnStats>) -> Report {
        Report { blocks }
    }

    /// Per-column blocks in request order.
    pub fn blocks(&self) -> &[ColumnStats] {
        &self.blocks
    }

    /// Path the report copy is saved to: the source file's own directory and
    /// full name (extension included), with "-stats.txt" appended.
    pub fn output_path(source_path: &Path) -> PathBuf {
        let name = source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        source_path.with_file_name(format!("{name}{REPORT_SUFFIX}.txt"))
    }

    /// Writes the rendered report next to the source file and returns the
    /// path written. The in-memory report stays usable when this fails.
    pub fn save_beside(&self, source_path: &Path) -> Result<PathBuf, SheetStatsError> {
        let path = Self::output_path(source_path);
        fs::write(&path, self.to_string().as_bytes()).map_err(|source| {
            SheetStatsError::ReportWrite {
                path: path.clone(),
                source,
            }
        })?;
        debug!("report saved to '{}'", path.display());
        Ok(path)
    }
}

impl Display for Report {
    /// One four-line block per column, blank-line separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stats in &self.blocks {
            writeln!(f, "Column[{}], {}", stats.column, stats.label)?;
            writeln!(f, "Average:\t{}", stats.mean)?;
            writeln!(f, "Variance:\t{}", stats.variance)?;
            writeln!(f, "StdDev:\t{}", stats.stddev)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report::new(vec![ColumnStats {
            column: 2,
            label: "Score".to_owned(),
            mean: 20.0,
            variance: 100.0,
            stddev: 10.0,
        }])
    }

    #[test]
    fn block_format() {
        let rendered = sample_report().to_string();

        assert_eq!(
            rendered,
            "Column[2], Score\nAverage:\t20\nVariance:\t100\nStdDev:\t10\n\n"
        );
    }

    #[test]
    fn blocks_keep_request_order() {
        let report = Report::new(vec![
            ColumnStats {
                column: 7,
                label: "B".to_owned(),
                mean: 1.0,
                variance: 0.0,
                stddev: 0.0,
            },
            ColumnStats {
                column: 2,
                label: "A".to_owned(),
                mean: 2.0,
                variance: 0.0,
                stddev: 0.0,
            },
        ]);

        let rendered = report.to_string();

        let first = rendered.find("Column[7]").unwrap();
        let second = rendered.find("Column[2]").unwrap();
        assert!(first < second);
    }

    #[test]
    fn output_path_keeps_the_full_source_name() {
        let path = Report::output_path(Path::new("/x/data.xls"));

        assert_eq!(path, Path::new("/x/data.xls-stats.txt"));
    }

    #[test]
    fn saved_bytes_equal_rendered_report() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("data.xls");
        let report = sample_report();

        let saved_to = report.save_beside(&source_path).unwrap();

        assert_eq!(saved_to, dir.path().join("data.xls-stats.txt"));
        assert_eq!(fs::read(&saved_to).unwrap(), report.to_string().into_bytes());
    }

    #[test]
    fn unwritable_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("missing").join("data.xls");

        let error = sample_report().save_beside(&source_path).unwrap_err();

        assert!(matches!(error, SheetStatsError::ReportWrite { .. }));
    }
}
