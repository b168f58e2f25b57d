//! Tidy table materialisation and output sinks.
//!
//! Converts the enriched records into a polars DataFrame with the seven
//! output columns (country, year, pr, cl, status, continent, region),
//! sorted by country then year, and writes it to Parquet or CSV.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::EnrichedRecord;

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Build the tidy DataFrame, sorted by (country, year)
pub fn to_dataframe(records: &[EnrichedRecord]) -> Result<DataFrame> {
    let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let pr: Vec<Option<i64>> = records.iter().map(|r| r.pr).collect();
    let cl: Vec<Option<i64>> = records.iter().map(|r| r.cl).collect();
    let status: Vec<Option<String>> = records
        .iter()
        .map(|r| r.status.map(|s| s.as_code().to_string()))
        .collect();
    let continent: Vec<Option<String>> = records.iter().map(|r| r.continent.clone()).collect();
    let region: Vec<Option<String>> = records.iter().map(|r| r.region.clone()).collect();

    let frame = df!(
        "country" => countries,
        "year" => years,
        "pr" => pr,
        "cl" => cl,
        "status" => status,
        "continent" => continent,
        "region" => region,
    )?;

    let sorted = frame
        .lazy()
        .sort_by_exprs([col("country"), col("year")], SortMultipleOptions::default())
        .collect()?;

    debug!(
        "Materialised tidy table: {} rows x {} columns",
        sorted.height(),
        sorted.width()
    );

    Ok(sorted)
}

/// Write the tidy table to the configured sink
pub fn write_output(df: &mut DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    match format {
        OutputFormat::Parquet => {
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(df)?;
        }
        OutputFormat::Csv => {
            CsvWriter::new(file).finish(df)?;
        }
    }

    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
