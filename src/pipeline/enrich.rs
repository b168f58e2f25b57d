//! Continent enrichment via the country reference table.
//!
//! The reference table maps country name to (continent, region) with
//! exact, case-sensitive matching. No fuzzy matching and no aliasing of
//! historical names: "Yemen, N." against a table carrying only "Yemen"
//! simply yields nulls. The join is left-preserving, so every wide
//! record survives regardless of reference coverage.

use crate::error::{FiwError, Result};
use crate::models::{EnrichedRecord, WideRecord};
use std::collections::HashMap;
use tracing::debug;

/// Country name -> (continent, region) lookup table
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, (String, String)>,
}

impl ReferenceTable {
    /// Parse a delimited reference file with at least the columns
    /// `name`, `region` and `sub-region`, consumed here as country,
    /// continent and region. A repeated name is a data-quality failure:
    /// it would duplicate every matching row of the join.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(bytes);

        let headers = reader.headers()?.clone();
        let name_idx = column_index(&headers, "name")?;
        let region_idx = column_index(&headers, "region")?;
        let sub_region_idx = column_index(&headers, "sub-region")?;

        let mut entries = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let name = record.get(name_idx).unwrap_or("").trim().to_string();
            if name.is_empty() {
                continue;
            }
            let continent = record.get(region_idx).unwrap_or("").trim().to_string();
            let region = record.get(sub_region_idx).unwrap_or("").trim().to_string();

            if entries.insert(name.clone(), (continent, region)).is_some() {
                return Err(FiwError::DuplicateReferenceEntry { country: name });
            }
        }

        debug!("Loaded reference table with {} countries", entries.len());
        Ok(Self { entries })
    }

    pub fn lookup(&self, country: &str) -> Option<&(String, String)> {
        self.entries.get(country)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            FiwError::malformed(format!("reference table is missing the '{}' column", name))
        })
}

/// Join wide records against the reference table, left-preserving.
///
/// Non-empty continent/region cells become Some; a missing country or
/// an empty cell yields None without dropping the record.
pub fn enrich(records: Vec<WideRecord>, reference: &ReferenceTable) -> Vec<EnrichedRecord> {
    records
        .into_iter()
        .map(|record| {
            let (continent, region) = match reference.lookup(&record.country) {
                Some((continent, region)) => (
                    non_empty(continent.clone()),
                    non_empty(region.clone()),
                ),
                None => (None, None),
            };
            EnrichedRecord {
                country: record.country,
                year: record.year,
                pr: record.pr,
                cl: record.cl,
                status: record.status,
                continent,
                region,
            }
        })
        .collect()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    const REFERENCE_CSV: &[u8] = b"name,alpha-2,region,sub-region\n\
        Chile,CL,Americas,Latin America and the Caribbean\n\
        Norway,NO,Europe,Northern Europe\n";

    fn wide(country: &str, year: i32) -> WideRecord {
        WideRecord {
            country: country.to_string(),
            year,
            pr: Some(4),
            cl: Some(3),
            status: Some(Status::PartlyFree),
        }
    }

    #[test]
    fn test_reference_table_parses_required_columns() {
        let table = ReferenceTable::from_csv(REFERENCE_CSV).unwrap();
        assert_eq!(table.len(), 2);
        let (continent, region) = table.lookup("Chile").unwrap();
        assert_eq!(continent, "Americas");
        assert_eq!(region, "Latin America and the Caribbean");
    }

    #[test]
    fn test_reference_table_rejects_missing_columns() {
        let err = ReferenceTable::from_csv(b"name,continent\nChile,Americas\n").unwrap_err();
        assert!(matches!(err, FiwError::MalformedSource { .. }));
    }

    #[test]
    fn test_reference_table_rejects_duplicate_names() {
        let csv = b"name,region,sub-region\nChile,Americas,South\nChile,Americas,South\n";
        let err = ReferenceTable::from_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            FiwError::DuplicateReferenceEntry { country } if country == "Chile"
        ));
    }

    #[test]
    fn test_enrich_is_left_preserving() {
        let table = ReferenceTable::from_csv(REFERENCE_CSV).unwrap();
        let records = vec![wide("Chile", 1973), wide("Atlantis", 1973), wide("Atlantis", 1974)];
        let enriched = enrich(records, &table);
        assert_eq!(enriched.len(), 3);
    }

    #[test]
    fn test_enrich_unmatched_country_gets_nulls() {
        let table = ReferenceTable::from_csv(REFERENCE_CSV).unwrap();
        let enriched = enrich(vec![wide("Atlantis", 1973)], &table);
        assert_eq!(enriched[0].continent, None);
        assert_eq!(enriched[0].region, None);
        assert_eq!(enriched[0].pr, Some(4));
    }

    #[test]
    fn test_enrich_match_is_case_sensitive() {
        let table = ReferenceTable::from_csv(REFERENCE_CSV).unwrap();
        let enriched = enrich(vec![wide("chile", 1973)], &table);
        assert_eq!(enriched[0].continent, None);
    }

    #[test]
    fn test_enrich_copies_ratings_through() {
        let table = ReferenceTable::from_csv(REFERENCE_CSV).unwrap();
        let enriched = enrich(vec![wide("Norway", 1980)], &table);
        assert_eq!(enriched[0].year, 1980);
        assert_eq!(enriched[0].status, Some(Status::PartlyFree));
        assert_eq!(enriched[0].continent.as_deref(), Some("Europe"));
        assert_eq!(enriched[0].region.as_deref(), Some("Northern Europe"));
    }
}
