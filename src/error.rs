//! Error handling for the ratings pipeline.
//!
//! Every failure in this pipeline is fatal: the source dataset has a
//! known, hand-verified shape, so the transforms trade resilience for
//! correctness and abort on the first structural violation. Messages
//! identify the stage and the (country, year, variable) that triggered
//! the failure.

use crate::models::VariableLabel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FiwError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Source unavailable: {source_name} - {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Malformed source: {reason}")]
    MalformedSource { reason: String },

    #[error("Irregular column count: {data_columns} data columns is not divisible by 3")]
    IrregularColumnCount { data_columns: usize },

    #[error("Duplicate {variable} value for {country} in {year} - column layout is inconsistent")]
    DuplicateVariableInGroup {
        country: String,
        year: i32,
        variable: VariableLabel,
    },

    #[error("Rating out of range for {country} in {year}: {variable} = {value} (valid range 1..=7)")]
    OutOfRangeRating {
        country: String,
        year: i32,
        variable: VariableLabel,
        value: i64,
    },

    #[error("Duplicate reference table entry for country: {country}")]
    DuplicateReferenceEntry { country: String },
}

impl FiwError {
    /// Create a source unavailable error with context
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed source error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FiwError>;
