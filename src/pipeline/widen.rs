//! Long-to-wide pivot: one record per (country, year).
//!
//! Groups tagged records by (country, year) and fills the pr, cl and
//! status fields from the matching variable entries. A second value for
//! the same variable in one group means the positional model broke
//! upstream (column count or offset mismatch) and is a fatal error.

use crate::error::{FiwError, Result};
use crate::models::{Status, TaggedRecord, VariableLabel, WideRecord};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Pivot tagged records into wide records, preserving first-seen group order.
///
/// A second record for the same (country, year, variable) is rejected
/// even when its cell is empty: the positional model emits each triple
/// exactly once, so a repeat means the column layout drifted upstream.
pub fn widen(records: Vec<TaggedRecord>) -> Result<Vec<WideRecord>> {
    let mut wide: Vec<WideRecord> = Vec::new();
    let mut index: HashMap<(String, i32), usize> = HashMap::new();
    let mut seen: HashSet<(usize, VariableLabel)> = HashSet::new();

    for record in records {
        let key = (record.country.clone(), record.year);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                wide.push(WideRecord::empty(record.country.clone(), record.year));
                index.insert(key, wide.len() - 1);
                wide.len() - 1
            }
        };

        if !seen.insert((slot, record.variable)) {
            return Err(duplicate(&record));
        }

        let group = &mut wide[slot];
        match record.variable {
            VariableLabel::Pr => group.pr = parse_rating(&record)?,
            VariableLabel::Cl => group.cl = parse_rating(&record)?,
            VariableLabel::Status => group.status = parse_status(&record)?,
        }
    }

    debug!("Widened into {} (country, year) records", wide.len());
    Ok(wide)
}

fn duplicate(record: &TaggedRecord) -> FiwError {
    FiwError::DuplicateVariableInGroup {
        country: record.country.clone(),
        year: record.year,
        variable: record.variable,
    }
}

/// Coerce a rating cell to an integer. Range checking is deferred to
/// the recoder so out-of-range values fail there with a dedicated error.
fn parse_rating(record: &TaggedRecord) -> Result<Option<i64>> {
    let raw = match &record.raw_value {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let numeric: f64 = raw.parse().map_err(|_| {
        FiwError::malformed(format!(
            "non-numeric {} value '{}' for {} in {}",
            record.variable, raw, record.country, record.year
        ))
    })?;

    if numeric.fract() != 0.0 {
        return Err(FiwError::malformed(format!(
            "fractional {} value '{}' for {} in {}",
            record.variable, raw, record.country, record.year
        )));
    }

    Ok(Some(numeric as i64))
}

fn parse_status(record: &TaggedRecord) -> Result<Option<Status>> {
    let raw = match &record.raw_value {
        Some(raw) => raw,
        None => return Ok(None),
    };

    Status::from_code(raw).map(Some).ok_or_else(|| {
        FiwError::malformed(format!(
            "unknown status code '{}' for {} in {}",
            raw, record.country, record.year
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(
        country: &str,
        ordinal: usize,
        year: i32,
        variable: VariableLabel,
        raw_value: Option<&str>,
    ) -> TaggedRecord {
        TaggedRecord {
            country: country.to_string(),
            ordinal,
            year,
            variable,
            raw_value: raw_value.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_widen_fills_one_record_per_group() {
        let records = vec![
            tagged("A", 0, 1973, VariableLabel::Pr, Some("4")),
            tagged("A", 1, 1973, VariableLabel::Cl, Some("5")),
            tagged("A", 2, 1973, VariableLabel::Status, Some("PF")),
        ];
        let wide = widen(records).unwrap();
        assert_eq!(wide.len(), 1);
        assert_eq!(
            wide[0],
            WideRecord {
                country: "A".to_string(),
                year: 1973,
                pr: Some(4),
                cl: Some(5),
                status: Some(Status::PartlyFree),
            }
        );
    }

    #[test]
    fn test_widen_count_is_years_times_countries() {
        // 2 countries x 2 years, 3 variables each
        let mut records = Vec::new();
        let mut ordinal = 0;
        for country in ["A", "B"] {
            for year in [1973, 1974] {
                for variable in [VariableLabel::Pr, VariableLabel::Cl, VariableLabel::Status] {
                    let raw = match variable {
                        VariableLabel::Status => "F",
                        _ => "1",
                    };
                    records.push(tagged(country, ordinal, year, variable, Some(raw)));
                    ordinal += 1;
                }
            }
        }
        let wide = widen(records).unwrap();
        assert_eq!(wide.len(), 4);
    }

    #[test]
    fn test_widen_null_cells_stay_null() {
        let records = vec![
            tagged("A", 0, 1973, VariableLabel::Pr, None),
            tagged("A", 1, 1973, VariableLabel::Cl, Some("3")),
            tagged("A", 2, 1973, VariableLabel::Status, None),
        ];
        let wide = widen(records).unwrap();
        assert_eq!(wide[0].pr, None);
        assert_eq!(wide[0].cl, Some(3));
        assert_eq!(wide[0].status, None);
    }

    #[test]
    fn test_widen_rejects_duplicate_variable_in_group() {
        let records = vec![
            tagged("A", 0, 1973, VariableLabel::Pr, Some("4")),
            tagged("A", 1, 1973, VariableLabel::Pr, Some("2")),
        ];
        let err = widen(records).unwrap_err();
        assert!(matches!(
            err,
            FiwError::DuplicateVariableInGroup {
                variable: VariableLabel::Pr,
                ..
            }
        ));
    }

    #[test]
    fn test_widen_rejects_non_numeric_rating() {
        let records = vec![tagged("A", 0, 1973, VariableLabel::Pr, Some("four"))];
        assert!(matches!(
            widen(records).unwrap_err(),
            FiwError::MalformedSource { .. }
        ));
    }

    #[test]
    fn test_widen_rejects_unknown_status_code() {
        let records = vec![tagged("A", 0, 1973, VariableLabel::Status, Some("XX"))];
        assert!(matches!(
            widen(records).unwrap_err(),
            FiwError::MalformedSource { .. }
        ));
    }

    #[test]
    fn test_widen_keeps_out_of_range_rating_for_recoder() {
        // Range enforcement is the recoder's job
        let records = vec![tagged("A", 0, 1973, VariableLabel::Pr, Some("9"))];
        let wide = widen(records).unwrap();
        assert_eq!(wide[0].pr, Some(9));
    }

    #[test]
    fn test_widen_preserves_group_order() {
        let records = vec![
            tagged("B", 0, 1973, VariableLabel::Pr, Some("1")),
            tagged("A", 1, 1973, VariableLabel::Pr, Some("2")),
            tagged("B", 2, 1974, VariableLabel::Pr, Some("3")),
        ];
        let wide = widen(records).unwrap();
        let keys: Vec<(&str, i32)> = wide.iter().map(|r| (r.country.as_str(), r.year)).collect();
        assert_eq!(keys, vec![("B", 1973), ("A", 1973), ("B", 1974)]);
    }
}
