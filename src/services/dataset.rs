//! Per-year vacancy CSV loader.
//!
//! Each per-year file carries the raw job-board dump format: UTF-8 with an
//! optional BOM, a header row, and one vacancy per data row. The loader
//! resolves columns by header name and produces two aligned record
//! sequences, one oriented for yearly statistics and one for city
//! statistics.
//!
//! Row policy is deliberately lenient: a row whose field count does not
//! match the header, or with any empty field, is skipped silently. That
//! matches the quality of the real dumps, where truncated rows are common.

use crate::constants::column;
use crate::error::{AppError, Result};
use crate::models::{CityVacancy, Salary, YearVacancy};
use crate::services::CurrencyTable;
use chrono::{DateTime, Datelike};
use csv::StringRecord;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Parsed contents of one per-year vacancy file
#[derive(Debug)]
pub struct YearDataset {
    /// Records oriented for the yearly reduction, in file order
    pub year_vacancies: Vec<YearVacancy>,

    /// Records oriented for the city reduction, aligned with `year_vacancies`
    pub city_vacancies: Vec<CityVacancy>,
}

/// Resolved indices of the required columns
struct ColumnIndices {
    name: usize,
    salary_from: usize,
    salary_to: usize,
    salary_currency: usize,
    area_name: usize,
    published_at: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            name: find_column(headers, column::NAME)?,
            salary_from: find_column(headers, column::SALARY_FROM)?,
            salary_to: find_column(headers, column::SALARY_TO)?,
            salary_currency: find_column(headers, column::SALARY_CURRENCY)?,
            area_name: find_column(headers, column::AREA_NAME)?,
            published_at: find_column(headers, column::PUBLISHED_AT)?,
        })
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        // the first header cell may still carry the UTF-8 BOM
        .position(|header| header.trim_start_matches('\u{feff}') == name)
        .ok_or_else(|| AppError::MissingColumn(name.to_string()))
}

/// Open an input CSV, distinguishing a missing file from other IO failures.
pub(crate) fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        _ => AppError::Io(err.to_string()),
    })
}

impl YearDataset {
    /// Load one per-year file into aligned year and city record vectors.
    ///
    /// Fails with `MissingColumn` when the header lacks a required column
    /// and with `NotFound`/`Io` when the file is unreadable. Malformed
    /// rows are skipped, not errored.
    pub fn load(path: &Path, rates: &CurrencyTable) -> Result<Self> {
        let file = open_input(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndices::resolve(&headers)?;
        let header_len = headers.len();

        let mut year_vacancies = Vec::new();
        let mut city_vacancies = Vec::new();
        let mut skipped = 0usize;

        for record in reader.records() {
            let record = record?;

            if record.len() != header_len || record.iter().any(|field| field.is_empty()) {
                skipped += 1;
                continue;
            }

            let salary = Salary::new(
                parse_salary_bound(&record[columns.salary_from])?,
                parse_salary_bound(&record[columns.salary_to])?,
                record[columns.salary_currency].to_string(),
                rates,
            )?;
            let year = published_year(&record[columns.published_at])?;

            year_vacancies.push(YearVacancy::new(
                record[columns.name].to_string(),
                salary.clone(),
                year,
            ));
            city_vacancies.push(CityVacancy::new(
                record[columns.area_name].to_string(),
                salary,
            ));
        }

        debug!(
            file = %path.display(),
            loaded = year_vacancies.len(),
            skipped,
            "Loaded per-year dataset"
        );

        Ok(Self {
            year_vacancies,
            city_vacancies,
        })
    }
}

/// Salary bounds arrive as decimal strings ("80000.0"); the fractional
/// part is truncated, not rounded.
fn parse_salary_bound(field: &str) -> Result<i64> {
    Ok(field.trim().parse::<f64>()? as i64)
}

/// Extract the publication year from a job-board timestamp.
///
/// The dump writes offsets without a colon ("2022-07-05T18:19:30+0300").
/// The tail is rewritten by inserting ':' and swapping the final two
/// characters, after which the value parses as RFC 3339.
fn published_year(raw: &str) -> Result<i32> {
    let normalized = normalize_offset(raw)?;
    let parsed = DateTime::parse_from_rfc3339(&normalized)
        .map_err(|err| AppError::Parse(format!("bad published_at '{}': {}", raw, err)))?;
    Ok(parsed.year())
}

fn normalize_offset(raw: &str) -> Result<String> {
    if raw.len() < 2 || !raw.is_char_boundary(raw.len() - 2) {
        return Err(AppError::Parse(format!("bad published_at '{}'", raw)));
    }

    let (head, tail) = raw.split_at(raw.len() - 2);
    let digits: Vec<char> = tail.chars().collect();
    if digits.len() != 2 {
        return Err(AppError::Parse(format!("bad published_at '{}'", raw)));
    }

    Ok(format!("{}:{}{}", head, digits[1], digits[0]))
}
