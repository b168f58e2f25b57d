//! Core data structures for the ratings pipeline.
//!
//! Defines the positional grid loaded from the workbook, the long and
//! wide record forms the reshape passes through, and the run statistics
//! reported by the pipeline.

use crate::constants::VARIABLES_PER_YEAR;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The three variables encoded positionally in each year run.
///
/// The source workbook's header row is unreliable (blank placeholder
/// labels), so variable identity is never read from header text. It is
/// a pure function of the 1-indexed position of a data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableLabel {
    /// Political rights rating (1..=7)
    Pr,
    /// Civil liberties rating (1..=7)
    Cl,
    /// Freedom status (F, PF, NF)
    Status,
}

impl VariableLabel {
    /// Assign the variable for a 1-indexed data column position.
    ///
    /// Position p maps as: p mod 3 == 1 -> pr, == 2 -> cl, == 0 -> status.
    pub fn from_position(position: usize) -> Self {
        debug_assert!(position >= 1, "data column positions are 1-indexed");
        match position % VARIABLES_PER_YEAR {
            1 => VariableLabel::Pr,
            2 => VariableLabel::Cl,
            _ => VariableLabel::Status,
        }
    }

    /// Output column name for this variable
    pub fn column_name(&self) -> &'static str {
        match self {
            VariableLabel::Pr => "pr",
            VariableLabel::Cl => "cl",
            VariableLabel::Status => "status",
        }
    }
}

impl fmt::Display for VariableLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Freedom status codes as published by Freedom House
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Free,
    PartlyFree,
    NotFree,
}

impl Status {
    /// Parse a status cell. Returns None for codes outside {F, PF, NF}.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F" => Some(Status::Free),
            "PF" => Some(Status::PartlyFree),
            "NF" => Some(Status::NotFree),
            _ => None,
        }
    }

    /// Two-letter code used in the output table
    pub fn as_code(&self) -> &'static str {
        match self {
            Status::Free => "F",
            Status::PartlyFree => "PF",
            Status::NotFree => "NF",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Positional grid of cells read from the workbook.
///
/// Column 0 holds country names; None marks an empty cell or one that
/// matched the configured NA marker. Header-like and blank separator
/// rows survive loading with a None country cell and are dropped by the
/// reshaper.
#[derive(Debug, Clone, Default)]
pub struct RawGrid {
    pub rows: Vec<Vec<Option<String>>>,
    width: usize,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<Option<String>>>, width: usize) -> Self {
        Self { rows, width }
    }

    /// Total columns including the country column
    pub fn width(&self) -> usize {
        self.width
    }

    /// Data columns to the right of the country column
    pub fn data_column_count(&self) -> usize {
        self.width.saturating_sub(1)
    }
}

/// One (country, data column) observation in long form.
///
/// `ordinal` is an explicit global emission index: downstream year and
/// variable assignment depends on position, and carrying the index on
/// the record keeps the transform stable under reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRecord {
    pub country: String,
    pub ordinal: usize,
    /// 1-indexed position within the data columns of the source grid
    pub column_index: usize,
    pub raw_value: Option<String>,
}

/// A long record after positional variable and year assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedRecord {
    pub country: String,
    pub ordinal: usize,
    pub year: i32,
    pub variable: VariableLabel,
    pub raw_value: Option<String>,
}

/// The unit of analysis: one row per (country, year).
///
/// Ratings stay i64 until after recoding so that out-of-range values
/// reach the recoder intact and fail there with context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WideRecord {
    pub country: String,
    pub year: i32,
    pub pr: Option<i64>,
    pub cl: Option<i64>,
    pub status: Option<Status>,
}

impl WideRecord {
    pub fn empty(country: String, year: i32) -> Self {
        Self {
            country,
            year,
            pr: None,
            cl: None,
            status: None,
        }
    }
}

/// A wide record joined against the continent reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub country: String,
    pub year: i32,
    pub pr: Option<i64>,
    pub cl: Option<i64>,
    pub status: Option<Status>,
    pub continent: Option<String>,
    pub region: Option<String>,
}

/// Statistics reported after a pipeline run
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub countries: usize,
    pub years: usize,
    pub rows: usize,
    pub unmatched_countries: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_assignment_cycles_over_positions() {
        assert_eq!(VariableLabel::from_position(1), VariableLabel::Pr);
        assert_eq!(VariableLabel::from_position(2), VariableLabel::Cl);
        assert_eq!(VariableLabel::from_position(3), VariableLabel::Status);
        assert_eq!(VariableLabel::from_position(4), VariableLabel::Pr);
        assert_eq!(VariableLabel::from_position(147), VariableLabel::Status);
    }

    #[test]
    fn test_status_codes_round_trip() {
        for code in ["F", "PF", "NF"] {
            assert_eq!(Status::from_code(code).unwrap().as_code(), code);
        }
        assert_eq!(Status::from_code("X"), None);
        assert_eq!(Status::from_code("f"), None);
    }

    #[test]
    fn test_grid_column_counts() {
        let grid = RawGrid::new(vec![vec![Some("A".to_string()), None, None, None]], 4);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.data_column_count(), 3);
    }
}
