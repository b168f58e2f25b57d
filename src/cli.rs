//! Command-line interface components.

use crate::config::{FiwConfig, OutputFormat, SourceLocation};
use crate::constants::DEFAULT_OUTPUT_STEM;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fiw-processor")]
#[command(about = "Tidy Freedom House country ratings from wide Excel format into Parquet or CSV")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Ratings workbook URL or local path (defaults to the published
    /// Freedom House workbook)
    #[arg(value_name = "RATINGS_SOURCE")]
    pub ratings: Option<String>,

    /// Reference table URL or local path mapping country name to
    /// continent and region
    #[arg(short, long, value_name = "SOURCE")]
    pub reference: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output file format
    #[arg(long, value_enum, default_value = "parquet")]
    pub format: OutputFormat,

    /// Zero-indexed worksheet carrying the ratings grid
    #[arg(long, default_value_t = crate::constants::DEFAULT_SHEET_INDEX)]
    pub sheet: usize,

    /// Leading rows to discard before the header-like row
    #[arg(long, default_value_t = crate::constants::DEFAULT_SKIP_ROWS)]
    pub skip_rows: usize,

    /// Cell text treated as missing data
    #[arg(long, default_value = crate::constants::DEFAULT_NA_MARKER)]
    pub na_marker: String,

    /// Year covered by the first 3-column run
    #[arg(long, default_value_t = crate::constants::DEFAULT_BASE_YEAR)]
    pub base_year: i32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the pipeline configuration from the parsed arguments
    pub fn to_config(&self) -> FiwConfig {
        let mut config = FiwConfig::default()
            .with_sheet_index(self.sheet)
            .with_skip_rows(self.skip_rows)
            .with_na_marker(self.na_marker.clone())
            .with_base_year(self.base_year);

        if let Some(ratings) = &self.ratings {
            config = config.with_ratings_source(SourceLocation::parse(ratings));
        }
        if let Some(reference) = &self.reference {
            config = config.with_reference_source(SourceLocation::parse(reference));
        }

        let output_path = self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, self.format.extension()))
        });
        config.with_output(output_path, self.format)
    }
}

/// Initialise tracing output; --verbose lowers the filter to debug
pub fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
