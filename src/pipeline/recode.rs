//! Rating recoding: the fixed 7-point reversal.
//!
//! Raw pr and cl codes run 1 (most free) to 7 (least free); the output
//! table stores the reversed scale 8 - k so larger values mean more
//! freedom. The mapping is an explicit lookup table over exactly the
//! valid domain; anything outside 1..=7 is a fatal `OutOfRangeRating`
//! rather than a silent fallthrough. Status is untouched.

use crate::constants::{RATING_MIN, RATING_MAX};
use crate::error::{FiwError, Result};
use crate::models::{VariableLabel, WideRecord};

/// Reversal table indexed by k - 1: entry for k is 8 - k
const RATING_REVERSAL: [i64; 7] = [7, 6, 5, 4, 3, 2, 1];

/// Recode pr and cl on every record; null ratings pass through
pub fn recode(records: Vec<WideRecord>) -> Result<Vec<WideRecord>> {
    records
        .into_iter()
        .map(|mut record| {
            record.pr = recode_rating(record.pr, &record, VariableLabel::Pr)?;
            record.cl = recode_rating(record.cl, &record, VariableLabel::Cl)?;
            Ok(record)
        })
        .collect()
}

fn recode_rating(
    value: Option<i64>,
    record: &WideRecord,
    variable: VariableLabel,
) -> Result<Option<i64>> {
    match value {
        None => Ok(None),
        Some(k) if (RATING_MIN..=RATING_MAX).contains(&k) => {
            Ok(Some(RATING_REVERSAL[(k - RATING_MIN) as usize]))
        }
        Some(k) => Err(FiwError::OutOfRangeRating {
            country: record.country.clone(),
            year: record.year,
            variable,
            value: k,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn record(pr: Option<i64>, cl: Option<i64>, status: Option<Status>) -> WideRecord {
        WideRecord {
            country: "A".to_string(),
            year: 1973,
            pr,
            cl,
            status,
        }
    }

    #[test]
    fn test_recode_reverses_scale() {
        let out = recode(vec![record(Some(4), Some(5), Some(Status::PartlyFree))]).unwrap();
        assert_eq!(out[0].pr, Some(4)); // 8 - 4
        assert_eq!(out[0].cl, Some(3)); // 8 - 5
    }

    #[test]
    fn test_recode_is_an_involution_on_valid_domain() {
        for k in 1..=7 {
            let once = recode(vec![record(Some(k), Some(k), None)]).unwrap();
            let twice = recode(once).unwrap();
            assert_eq!(twice[0].pr, Some(k));
            assert_eq!(twice[0].cl, Some(k));
        }
    }

    #[test]
    fn test_recode_is_a_bijection_on_valid_domain() {
        let mut seen = std::collections::HashSet::new();
        for k in 1..=7 {
            let out = recode(vec![record(Some(k), None, None)]).unwrap();
            let v = out[0].pr.unwrap();
            assert!((1..=7).contains(&v));
            assert!(seen.insert(v));
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_recode_leaves_status_untouched() {
        let out = recode(vec![
            record(Some(1), Some(7), Some(Status::Free)),
            record(None, None, Some(Status::NotFree)),
            record(Some(3), Some(3), None),
        ])
        .unwrap();
        assert_eq!(out[0].status, Some(Status::Free));
        assert_eq!(out[1].status, Some(Status::NotFree));
        assert_eq!(out[2].status, None);
    }

    #[test]
    fn test_recode_null_passes_through() {
        let out = recode(vec![record(None, None, None)]).unwrap();
        assert_eq!(out[0].pr, None);
        assert_eq!(out[0].cl, None);
    }

    #[test]
    fn test_recode_rejects_out_of_range_values() {
        for bad in [0, 8, -1, 100] {
            let err = recode(vec![record(Some(bad), None, None)]).unwrap_err();
            match err {
                FiwError::OutOfRangeRating { value, variable, .. } => {
                    assert_eq!(value, bad);
                    assert_eq!(variable, VariableLabel::Pr);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
