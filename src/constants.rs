//! Shared constants for the ratings pipeline.

/// Default location of the Freedom House ratings workbook
pub const DEFAULT_RATINGS_URL: &str =
    "https://freedomhouse.org/sites/default/files/Country_and_Territory_Ratings_and_Statuses_FIW1973-2021.xlsx";

/// Default location of the country -> region reference table
pub const DEFAULT_REFERENCE_URL: &str =
    "https://raw.githubusercontent.com/lukes/ISO-3166-Countries-with-Regional-Codes/master/all/all.csv";

/// Zero-indexed worksheet carrying the ratings grid (second sheet)
pub const DEFAULT_SHEET_INDEX: usize = 1;

/// Leading rows to discard before the header-like row
pub const DEFAULT_SKIP_ROWS: usize = 1;

/// Cell text treated as missing data
pub const DEFAULT_NA_MARKER: &str = "-";

/// Year covered by the first 3-column run
pub const DEFAULT_BASE_YEAR: i32 = 1973;

/// Data columns per year run: pr, cl, status
pub const VARIABLES_PER_YEAR: usize = 3;

/// Valid rating bounds (inclusive) for pr and cl
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 7;

/// Default output file stem
pub const DEFAULT_OUTPUT_STEM: &str = "fiw_ratings";
