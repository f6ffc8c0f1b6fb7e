// Core data structures for trendwatch

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::InputError;

/// Date format used by the trends service and the CLI
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered, non-empty-entry list of search keywords
///
/// Entries are trimmed and never empty. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Build from raw entries, trimming each and dropping blanks
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// Inclusive calendar date range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InputError> {
        if start > end {
            return Err(InputError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Service encoding of this range
    pub fn timeframe(&self) -> Timeframe {
        Timeframe(*self)
    }
}

/// Textual timeframe understood by the trends service: `"YYYY-MM-DD YYYY-MM-DD"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe(DateRange);

impl Timeframe {
    pub fn range(&self) -> DateRange {
        self.0
    }
}

impl From<DateRange> for Timeframe {
    fn from(range: DateRange) -> Self {
        Self(range)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.0.start.format(DATE_FORMAT),
            self.0.end.format(DATE_FORMAT)
        )
    }
}

impl FromStr for Timeframe {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InputError::InvalidTimeframe(s.to_string()));
        };

        let start = NaiveDate::parse_from_str(start, DATE_FORMAT)
            .map_err(|_| InputError::InvalidTimeframe(s.to_string()))?;
        let end = NaiveDate::parse_from_str(end, DATE_FORMAT)
            .map_err(|_| InputError::InvalidTimeframe(s.to_string()))?;

        DateRange::new(start, end).map(Self)
    }
}

/// One date of interest values, one value per keyword
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub values: Vec<u32>,
    /// Data for this date is still being collected
    pub is_partial: bool,
}

/// Interest-over-time table keyed by date, one column per keyword
///
/// Only built through [`TrendTable::new`] and [`TrendTable::from_rows`], so
/// every row holds exactly one value per keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendTable {
    keywords: Vec<String>,
    rows: Vec<TrendRow>,
}

impl TrendTable {
    /// Empty table with the given columns
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            rows: Vec::new(),
        }
    }

    /// Build from rows, sorting by date
    ///
    /// Each row's values are padded with zeros or truncated to the column count.
    pub fn from_rows(keywords: Vec<String>, mut rows: Vec<TrendRow>) -> Self {
        let width = keywords.len();
        for row in &mut rows {
            row.values.resize(width, 0);
        }
        rows.sort_by_key(|row| row.date);
        Self { keywords, rows }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn rows(&self) -> &[TrendRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|row| row.date)
    }

    /// Values of the column at `index`, in date order
    pub fn column(&self, index: usize) -> Option<Vec<u32>> {
        (index < self.keywords.len()).then(|| {
            self.rows
                .iter()
                .map(|row| row.values.get(index).copied().unwrap_or(0))
                .collect()
        })
    }

    /// `(date, value)` pairs for the first column named `keyword`
    pub fn series(&self, keyword: &str) -> Option<Vec<(NaiveDate, u32)>> {
        let index = self.keywords.iter().position(|k| k == keyword)?;
        Some(self.dates().zip(self.column(index)?).collect())
    }
}
