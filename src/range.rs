use crate::error::SheetStatsError;
use regex::Regex;

/// Columns sampled when the user leaves the column range empty.
pub const DEFAULT_COLUMNS: [usize; 3] = [2, 3, 4];

/// Row the default interval starts at, skipping the header row.
const DEFAULT_ROW_START: usize = 1;

/// Ordered column indices to sample (0-based).
/// Duplicates are allowed and order is preserved exactly as entered.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSelection(pub Vec<usize>);

impl ColumnSelection {
    /// Iterates over the selected column indices in user order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Number of selected columns, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&str> for ColumnSelection {
    type Error = SheetStatsError;

    /// Parses a comma-separated list of 0-based column indices.
    /// An empty string selects the default columns. A single bad token fails
    /// the whole parse and names the token.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(ColumnSelection(DEFAULT_COLUMNS.to_vec()));
        }
        value
            .split(',')
            .map(str::trim)
            .map(|token| {
                token.parse::<usize>().map_err(|_| SheetStatsError::ColumnRange {
                    input: value.to_owned(),
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<usize>, SheetStatsError>>()
            .map(ColumnSelection)
    }
}

/// Upper bound of a row interval.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RowBound {
    /// Exclusive row index.
    Index(usize),
    /// The `END` marker, resolved to the source's physical row count at read time.
    LastRow,
}

/// Half-open row interval `[start, end)` (0-based).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowInterval {
    pub start: usize,
    pub end: RowBound,
}

impl RowInterval {
    /// Resolves the interval against a concrete row count.
    /// No ordering check happens here: an inverted interval reads nothing
    /// downstream and the statistics come out NaN.
    pub fn resolve(&self, physical_row_count: usize) -> (usize, usize) {
        let end = match self.end {
            RowBound::Index(end) => end,
            RowBound::LastRow => physical_row_count,
        };
        (self.start, end)
    }
}

impl TryFrom<&str> for RowInterval {
    type Error = SheetStatsError;

    /// Parses a row interval string `<start>-<end>` where `<end>` is a row
    /// index or the literal `END` (case-sensitive).
    /// An empty string selects the default interval.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(RowInterval {
                start: DEFAULT_ROW_START,
                end: RowBound::LastRow,
            });
        }
        let pattern = Regex::new(r"^(\d+)-(\d+|END)$").expect("Hardcode regex pattern");
        let captures = pattern
            .captures(value)
            .ok_or_else(|| SheetStatsError::RowRange(value.to_owned()))?;
        let start = captures[1]
            .parse::<usize>()
            .map_err(|_| SheetStatsError::RowRange(value.to_owned()))?;
        let end = match &captures[2] {
            "END" => RowBound::LastRow,
            token => RowBound::Index(
                token
                    .parse::<usize>()
                    .map_err(|_| SheetStatsError::RowRange(value.to_owned()))?,
            ),
        };
        Ok(RowInterval { start, end })
    }
}

/// The parsed, validated pair of user-entered range strings.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeSpec {
    pub columns: ColumnSelection,
    pub rows: RowInterval,
}

impl RangeSpec {
    /// Converts the two free-form strings into a typed selection plan.
    pub fn parse(columns_text: &str, rows_text: &str) -> Result<RangeSpec, SheetStatsError> {
        Ok(RangeSpec {
            columns: ColumnSelection::try_from(columns_text)?,
            rows: RowInterval::try_from(rows_text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_select_defaults() {
        let spec = RangeSpec::parse("", "").unwrap();

        assert_eq!(spec.columns, ColumnSelection(vec![2, 3, 4]));
        assert_eq!(spec.rows.start, 1);
        assert_eq!(spec.rows.end, RowBound::LastRow);
    }

    #[test]
    fn columns_keep_order_and_duplicates() {
        let columns = ColumnSelection::try_from("4, 2,2 ,7").unwrap();

        assert_eq!(columns, ColumnSelection(vec![4, 2, 2, 7]));
    }

    #[test]
    fn column_parse_fails_on_bad_token() {
        let error = ColumnSelection::try_from("2,x,4").unwrap_err();

        match error {
            SheetStatsError::ColumnRange { token, .. } => assert_eq!(token, "x"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn column_parse_fails_on_negative_index() {
        assert!(ColumnSelection::try_from("2,-3").is_err());
    }

    #[test]
    fn row_interval_bounded() {
        let rows = RowInterval::try_from("1-99").unwrap();

        assert_eq!(rows.start, 1);
        assert_eq!(rows.end, RowBound::Index(99));
    }

    #[test]
    fn row_interval_open_ended() {
        let rows = RowInterval::try_from("0-END").unwrap();

        assert_eq!(rows.start, 0);
        assert_eq!(rows.end, RowBound::LastRow);
    }

    #[test]
    fn row_interval_rejects_malformed_input() {
        for input in ["abc", "1-", "-99", "1-2-3", "1-end", "1:99"] {
            assert!(RowInterval::try_from(input).is_err(), "accepted '{input}'");
        }
    }

    #[test]
    fn row_interval_resolution() {
        let open = RowInterval { start: 1, end: RowBound::LastRow };
        let bounded = RowInterval { start: 1, end: RowBound::Index(5) };

        assert_eq!(open.resolve(10), (1, 10));
        assert_eq!(bounded.resolve(10), (1, 5));
    }
}
