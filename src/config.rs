//! Configuration for the ratings pipeline.
//!
//! Captures the source locations and the layout conventions of the
//! ratings workbook: which worksheet carries the grid, how many leading
//! rows precede the header-like row, the NA marker, and the year covered
//! by the first column run.

use crate::constants::{
    DEFAULT_BASE_YEAR, DEFAULT_NA_MARKER, DEFAULT_OUTPUT_STEM, DEFAULT_RATINGS_URL,
    DEFAULT_REFERENCE_URL, DEFAULT_SHEET_INDEX, DEFAULT_SKIP_ROWS,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A remote or local data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceLocation {
    Url(String),
    Path(PathBuf),
}

impl SourceLocation {
    /// Interpret a CLI argument as a URL or a filesystem path
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SourceLocation::Url(raw.to_string())
        } else {
            SourceLocation::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(url) => f.write_str(url),
            SourceLocation::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Output file formats for the tidy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Parquet with snappy compression
    Parquet,
    /// Plain CSV
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Global configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiwConfig {
    /// Ratings workbook location
    pub ratings_source: SourceLocation,

    /// Country -> region reference table location
    pub reference_source: SourceLocation,

    /// Zero-indexed worksheet carrying the ratings grid
    pub sheet_index: usize,

    /// Leading rows to discard before the header-like row
    pub skip_rows: usize,

    /// Cell text treated as missing data
    pub na_marker: String,

    /// Year covered by the first 3-column run
    pub base_year: i32,

    /// Output file path
    pub output_path: PathBuf,

    /// Output file format
    pub format: OutputFormat,
}

impl Default for FiwConfig {
    fn default() -> Self {
        Self {
            ratings_source: SourceLocation::Url(DEFAULT_RATINGS_URL.to_string()),
            reference_source: SourceLocation::Url(DEFAULT_REFERENCE_URL.to_string()),
            sheet_index: DEFAULT_SHEET_INDEX,
            skip_rows: DEFAULT_SKIP_ROWS,
            na_marker: DEFAULT_NA_MARKER.to_string(),
            base_year: DEFAULT_BASE_YEAR,
            output_path: PathBuf::from(format!("{}.parquet", DEFAULT_OUTPUT_STEM)),
            format: OutputFormat::Parquet,
        }
    }
}

impl FiwConfig {
    /// Set the ratings workbook source
    pub fn with_ratings_source(mut self, source: SourceLocation) -> Self {
        self.ratings_source = source;
        self
    }

    /// Set the reference table source
    pub fn with_reference_source(mut self, source: SourceLocation) -> Self {
        self.reference_source = source;
        self
    }

    /// Set the zero-indexed worksheet to read
    pub fn with_sheet_index(mut self, sheet_index: usize) -> Self {
        self.sheet_index = sheet_index;
        self
    }

    /// Set the number of leading rows to discard
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// Set the NA marker
    pub fn with_na_marker(mut self, na_marker: impl Into<String>) -> Self {
        self.na_marker = na_marker.into();
        self
    }

    /// Set the base year of the first column run
    pub fn with_base_year(mut self, base_year: i32) -> Self {
        self.base_year = base_year;
        self
    }

    /// Set the output path and format together
    pub fn with_output(mut self, output_path: PathBuf, format: OutputFormat) -> Self {
        self.output_path = output_path;
        self.format = format;
        self
    }
}
