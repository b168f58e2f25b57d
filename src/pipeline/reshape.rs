//! Wide-to-long reshape of the positional ratings grid.
//!
//! The source grid encodes variable identity and year purely by column
//! position: data columns come in runs of 3 (pr, cl, status), each run
//! one year later than the last. Header text is never consulted; the
//! header row itself carries blank placeholder labels and is dropped
//! here along with the blank separator rows, since neither has a
//! country cell.

use crate::constants::VARIABLES_PER_YEAR;
use crate::error::{FiwError, Result};
use crate::models::{LongRecord, RawGrid, TaggedRecord, VariableLabel};
use tracing::debug;

/// Melt the grid into one record per (country row, data column).
///
/// Rows with an empty country cell are dropped entirely. Column order
/// is preserved and each record carries an explicit ordinal, since the
/// downstream variable and year assignment is positional.
pub fn reshape(grid: &RawGrid) -> Result<Vec<LongRecord>> {
    let data_columns = grid.data_column_count();
    if data_columns == 0 {
        return Err(FiwError::malformed(
            "grid has no data columns beside the country column".to_string(),
        ));
    }
    if data_columns % VARIABLES_PER_YEAR != 0 {
        return Err(FiwError::IrregularColumnCount { data_columns });
    }

    let mut records = Vec::with_capacity(grid.rows.len() * data_columns);
    let mut ordinal = 0;
    let mut dropped_rows = 0;

    for row in &grid.rows {
        let country = match row.first().and_then(|c| c.as_deref()) {
            Some(name) => name,
            None => {
                dropped_rows += 1;
                continue;
            }
        };

        for column_index in 1..=data_columns {
            records.push(LongRecord {
                country: country.to_string(),
                ordinal,
                column_index,
                raw_value: row.get(column_index).cloned().flatten(),
            });
            ordinal += 1;
        }
    }

    debug!(
        "Reshaped {} data columns into {} long records, dropped {} countryless rows",
        data_columns,
        records.len(),
        dropped_rows
    );

    Ok(records)
}

/// Assign variable and year to each long record.
///
/// Pure function of the 1-indexed column position p: the variable
/// cycles pr, cl, status with p mod 3, and the year advances by one per
/// 3-column run, starting at `base_year` for run 0.
pub fn annotate(records: Vec<LongRecord>, base_year: i32) -> Vec<TaggedRecord> {
    records
        .into_iter()
        .map(|record| {
            let run = (record.column_index - 1) / VARIABLES_PER_YEAR;
            TaggedRecord {
                variable: VariableLabel::from_position(record.column_index),
                year: base_year + run as i32,
                country: record.country,
                ordinal: record.ordinal,
                raw_value: record.raw_value,
            }
        })
        .collect()
}
