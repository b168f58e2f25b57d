//! Freedom House ratings processor library.
//!
//! Converts the Freedom House "Country and Territory Ratings and
//! Statuses" workbook from its wide positional layout into a tidy
//! table of (country, year, pr, cl, status, continent, region) rows.
//!
//! This library provides tools for:
//! - Fetching the ratings workbook and a country reference table
//! - Reshaping the positionally-encoded grid into long records
//! - Widening back to one record per (country, year)
//! - Recoding the 7-point rating scales so larger means more free
//! - Enriching records with continent and region via an exact-name join
//! - Writing the tidy table to Parquet or CSV

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod models;
pub mod pipeline;

pub use config::{FiwConfig, OutputFormat, SourceLocation};
pub use error::{FiwError, Result};
pub use models::{
    EnrichedRecord, LongRecord, PipelineStats, RawGrid, Status, TaggedRecord, VariableLabel,
    WideRecord,
};
pub use pipeline::RatingsPipeline;
