//! Column statistics extraction.
//!
//! A single probe cell commits each selected column to one representation
//! (plain numbers or percentage text) and every sampled row is read under
//! that representation. Mixed-type columns are unsupported and fail with an
//! explicit cell error.

use crate::error::SheetStatsError;
use crate::range::RangeSpec;
use crate::report::{ColumnStats, Report};
use crate::spreadsheet::{cell_position, TabularSource};
use calamine::Data;
use log::debug;

/// Value representation a probe cell commits an entire column to.
#[derive(Copy, Clone, Debug, PartialEq)]
enum ColumnKind {
    /// Cells hold plain numbers. Date cells count: the legacy format stores
    /// them as serial numbers and they read back as such.
    Numeric,
    /// Cells hold percentages as text, e.g. "12.5%".
    PercentageText,
}

/// Running sample for one column's descriptive statistics.
/// Conventions match the usual descriptive-statistics libraries: an empty
/// sample yields NaN, a single value has variance 0.
#[derive(Default)]
struct Sample {
    values: Vec<f64>,
}

impl Sample {
    fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Arithmetic mean; NaN over an empty sample.
    fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Sample variance with the N-1 denominator.
    fn variance(&self) -> f64 {
        match self.values.len() {
            0 => f64::NAN,
            1 => 0.0,
            n => {
                let mean = self.mean();
                let sum: f64 = self
                    .values
                    .iter()
                    .map(|value| (value - mean) * (value - mean))
                    .sum();
                sum / (n - 1) as f64
            }
        }
    }

    fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Computes per-column descriptive statistics over the selected rectangle.
///
/// Columns are processed independently, in the order they were requested.
/// The open-ended row bound is resolved once against the source's physical
/// row count and shared by every column.
pub fn extract<S: TabularSource>(source: &S, spec: &RangeSpec) -> Result<Report, SheetStatsError> {
    let (start, end) = spec.rows.resolve(source.physical_row_count());
    let mut blocks = Vec::with_capacity(spec.columns.len());
    for column in spec.columns.iter() {
        let mut sample = Sample::default();
        // An inverted or empty interval reads nothing, probe included; the
        // statistics come out NaN.
        if start < end {
            let kind = probe(source.cell(start, column)).ok_or_else(|| {
                SheetStatsError::CellType {
                    position: cell_position(start, column),
                    found: describe(source.cell(start, column)).to_owned(),
                }
            })?;
            debug!("column {column} probed as {kind:?}");
            for row in start..end {
                sample.push(read_value(source.cell(row, column), kind, row, column)?);
            }
        }
        blocks.push(ColumnStats {
            column,
            label: header_label(source, column),
            mean: sample.mean(),
            variance: sample.variance(),
            stddev: sample.stddev(),
        });
    }
    Ok(Report::new(blocks))
}

/// Decides the column representation from a single cell.
fn probe(cell: Option<&Data>) -> Option<ColumnKind> {
    match cell {
        Some(Data::Int(_)) | Some(Data::Float(_)) | Some(Data::DateTime(_)) => {
            Some(ColumnKind::Numeric)
        }
        Some(Data::String(_)) => Some(ColumnKind::PercentageText),
        _ => None,
    }
}

/// What a non-qualifying probe cell actually held, for the error message.
fn describe(cell: Option<&Data>) -> &'static str {
    match cell {
        None | Some(Data::Empty) => "empty",
        Some(Data::Bool(_)) => "boolean",
        Some(Data::Error(_)) => "error cell",
        _ => "unsupported",
    }
}

/// Reads one cell under the representation the probe committed to.
fn read_value(
    cell: Option<&Data>,
    kind: ColumnKind,
    row: usize,
    column: usize,
) -> Result<f64, SheetStatsError> {
    let value = match (kind, cell) {
        (ColumnKind::Numeric, Some(Data::Int(value))) => Some(*value as f64),
        (ColumnKind::Numeric, Some(Data::Float(value))) => Some(*value),
        (ColumnKind::Numeric, Some(Data::DateTime(value))) => Some(value.as_f64()),
        (ColumnKind::PercentageText, Some(Data::String(text))) => percentage_value(text),
        _ => None,
    };
    value.ok_or_else(|| SheetStatsError::CellValue {
        position: cell_position(row, column),
        message: match (kind, cell) {
            (_, None) | (_, Some(Data::Empty)) => "cell is empty".to_owned(),
            (ColumnKind::Numeric, Some(other)) => format!("'{other}' is not numeric"),
            (ColumnKind::PercentageText, Some(other)) => {
                format!("'{other}' is not a percentage")
            }
        },
    })
}

/// Coerces percentage text to a fraction: trim, strip one trailing '%',
/// parse, divide by 100. The division applies whether or not the '%' sign
/// is present.
fn percentage_value(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    number.parse::<f64>().ok().map(|value| value / 100.0)
}

/// Header labels always come from row 0, regardless of where the sampled
/// interval starts. Non-text cells coerce to their display string; a missing
/// header becomes an empty label.
fn header_label<S: TabularSource>(source: &S, column: usize) -> String {
    match source.cell(0, column) {
        Some(Data::String(text)) => text.to_owned(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
