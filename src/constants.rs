//! Domain constants for vacancy statistics.
//!
//! The conversion table and the CSV column set mirror the vacancy dump
//! format published by the job board: salaries come as a range plus a
//! currency code, locations as a plain city name.

/// Fixed conversion rates from salary currencies to rubles.
///
/// Salaries are normalized once at load time; the rates are frozen so
/// statistics stay comparable between runs.
pub const CURRENCY_TO_RUB: &[(&str, f64)] = &[
    ("AZN", 35.68),
    ("BYR", 23.91),
    ("EUR", 59.90),
    ("GEL", 21.74),
    ("KGS", 0.76),
    ("KZT", 0.13),
    ("RUR", 1.0),
    ("UAH", 1.64),
    ("USD", 60.66),
    ("UZS", 0.0055),
];

/// Required columns of a vacancy CSV header.
///
/// Columns are resolved by name, so their position in the file does not
/// matter and extra columns are ignored.
pub mod column {
    pub const NAME: &str = "name";
    pub const SALARY_FROM: &str = "salary_from";
    pub const SALARY_TO: &str = "salary_to";
    pub const SALARY_CURRENCY: &str = "salary_currency";
    pub const AREA_NAME: &str = "area_name";
    pub const PUBLISHED_AT: &str = "published_at";
}

/// A city must hold at least this share of all vacancies to appear in the
/// city reports. The absolute cutoff is `floor(threshold * total)`.
pub const CITY_SHARE_THRESHOLD: f64 = 0.01;

/// How long the coordinator waits for any single worker result before
/// giving up instead of hanging on a worker that died without reporting.
pub const WORKER_WAIT_SECS: u64 = 300;
