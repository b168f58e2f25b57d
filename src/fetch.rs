//! Source loading: fetching raw bytes and reading the ratings grid.
//!
//! The two sources of a run (ratings workbook, reference table) are
//! independent, so callers fetch them concurrently; nothing downstream
//! starts before both are in memory. Fetch failures and missing
//! worksheets surface as `SourceUnavailable`, a zero-column grid as
//! `MalformedSource`.

use crate::config::SourceLocation;
use crate::error::{FiwError, Result};
use crate::models::RawGrid;

use calamine::{DataType, Reader, Xlsx};
use reqwest::Client;
use std::io::Cursor;
use tokio::fs;
use tracing::debug;

/// Fetch the raw bytes of a source, from the network or the filesystem
pub async fn fetch_source(client: &Client, source: &SourceLocation) -> Result<Vec<u8>> {
    match source {
        SourceLocation::Url(url) => {
            debug!("Fetching {}", url);
            let response = client
                .get(url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| FiwError::source_unavailable(url, e.to_string()))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| FiwError::source_unavailable(url, e.to_string()))?;
            debug!("Fetched {} bytes from {}", bytes.len(), url);
            Ok(bytes.to_vec())
        }
        SourceLocation::Path(path) => {
            debug!("Reading {}", path.display());
            fs::read(path).await.map_err(|e| {
                FiwError::source_unavailable(path.display().to_string(), e.to_string())
            })
        }
    }
}

/// Read the ratings worksheet into a positional grid.
///
/// Selects the worksheet by zero-based index, discards `skip_rows`
/// leading rows, and normalises every remaining cell. The header-like
/// row below the skipped rows is kept: its country cell is blank, so
/// the reshaper drops it along with the blank separator rows.
pub fn read_ratings_grid(
    bytes: Vec<u8>,
    source_name: &str,
    sheet_index: usize,
    skip_rows: usize,
    na_marker: &str,
) -> Result<RawGrid> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| FiwError::malformed(format!("{}: not a readable workbook: {}", source_name, e)))?;

    let sheet_name = workbook
        .sheet_names()
        .get(sheet_index)
        .cloned()
        .ok_or_else(|| {
            FiwError::source_unavailable(
                source_name,
                format!(
                    "worksheet index {} not present ({} sheets available)",
                    sheet_index,
                    workbook.sheet_names().len()
                ),
            )
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| {
            FiwError::source_unavailable(source_name, format!("worksheet '{}' not found", sheet_name))
        })?
        .map_err(|e| {
            FiwError::malformed(format!("{}: failed to read worksheet '{}': {}", source_name, sheet_name, e))
        })?;

    let width = range.width();
    if width == 0 {
        return Err(FiwError::malformed(format!(
            "{}: worksheet '{}' has zero columns",
            source_name, sheet_name
        )));
    }

    let rows: Vec<Vec<Option<String>>> = range
        .rows()
        .skip(skip_rows)
        .map(|row| row.iter().map(|cell| normalize_cell(cell, na_marker)).collect())
        .collect();

    debug!(
        "Read grid from '{}': {} rows x {} columns after skipping {}",
        sheet_name,
        rows.len(),
        width,
        skip_rows
    );

    Ok(RawGrid::new(rows, width))
}

/// Normalise a worksheet cell to optional text.
///
/// Empty cells, error cells, and cells matching the NA marker become
/// None. Integral floats render without a fractional part so that a
/// rating stored as 4.0 coerces to "4".
fn normalize_cell(cell: &DataType, na_marker: &str) -> Option<String> {
    let text = match cell {
        DataType::Empty => return None,
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        DataType::Bool(b) => b.to_string(),
        _ => return None,
    };

    if text.is_empty() || text == na_marker {
        None
    } else {
        Some(text)
    }
}
