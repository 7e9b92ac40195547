//! Splits a combined vacancy dataset into per-year CSV files.
//!
//! Every data row is routed to `<year>.csv` in the output directory, where
//! the year is the first four characters of the row's `published_at` value.
//! Each new file starts with a UTF-8 BOM and a copy of the source header,
//! matching the encoding of the original dump.

use crate::constants::column;
use crate::error::{AppError, Result};
use crate::services::dataset::open_input;
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Outcome of one split run
#[derive(Debug, Clone, PartialEq)]
pub struct SplitStats {
    /// Number of per-year files written
    pub files: usize,

    /// Number of data rows routed into them
    pub rows: usize,
}

/// Split `input` into per-year files under `out_dir`.
///
/// Fails with `MissingColumn` when the header has no `published_at`
/// column and with `NotFound`/`Io` when the input is unreadable. Rows
/// whose `published_at` field is missing or too short to carry a year are
/// skipped.
pub fn split_by_year(input: &Path, out_dir: &Path) -> Result<SplitStats> {
    let file = open_input(input)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader.headers()?.clone();
    let published_at = headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}') == column::PUBLISHED_AT)
        .ok_or_else(|| AppError::MissingColumn(column::PUBLISHED_AT.to_string()))?;

    fs::create_dir_all(out_dir)?;

    let mut writers: HashMap<String, csv::Writer<File>> = HashMap::new();
    let mut rows = 0usize;
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;

        let year = match record.get(published_at) {
            Some(date) if date.len() >= 4 && date.is_char_boundary(4) => &date[..4],
            _ => {
                skipped += 1;
                continue;
            }
        };

        if !writers.contains_key(year) {
            let writer = new_year_writer(out_dir, year, &headers)?;
            writers.insert(year.to_string(), writer);
        }
        if let Some(writer) = writers.get_mut(year) {
            writer.write_record(&record)?;
            rows += 1;
        }
    }

    for writer in writers.values_mut() {
        writer.flush()?;
    }

    debug!(
        input = %input.display(),
        files = writers.len(),
        rows,
        skipped,
        "Split dataset by year"
    );

    Ok(SplitStats {
        files: writers.len(),
        rows,
    })
}

fn new_year_writer(
    out_dir: &Path,
    year: &str,
    headers: &StringRecord,
) -> Result<csv::Writer<File>> {
    let path = out_dir.join(format!("{}.csv", year));
    let mut file = File::create(&path)?;

    // utf-8-sig, same encoding as the source dump
    file.write_all("\u{feff}".as_bytes())?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(headers)?;
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CurrencyTable, YearDataset};

    const HEADER: &str = "name,salary_from,salary_to,salary_currency,area_name,published_at";

    #[test]
    fn test_rows_are_routed_by_publication_year() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vacancies.csv");
        std::fs::write(
            &input,
            format!(
                "\u{feff}{}\n\
                 Программист,50000,70000,RUR,Москва,2018-07-05T18:19:30+0300\n\
                 Аналитик,40000,50000,RUR,Казань,2019-03-01T12:00:00+0300\n\
                 Тестировщик,30000,40000,RUR,Тверь,2018-08-01T10:00:00+0300\n",
                HEADER
            ),
        )
        .unwrap();

        let out_dir = dir.path().join("years");
        let stats = split_by_year(&input, &out_dir).unwrap();

        assert_eq!(stats, SplitStats { files: 2, rows: 3 });
        assert!(out_dir.join("2018.csv").exists());
        assert!(out_dir.join("2019.csv").exists());

        let contents = std::fs::read_to_string(out_dir.join("2018.csv")).unwrap();
        assert!(contents.starts_with('\u{feff}'));
        assert_eq!(contents.lines().count(), 3); // header + two rows
    }

    #[test]
    fn test_missing_published_at_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vacancies.csv");
        std::fs::write(&input, "name,salary_from\nПрограммист,50000\n").unwrap();

        let err = split_by_year(&input, &dir.path().join("years")).unwrap_err();

        assert!(matches!(err, AppError::MissingColumn(name) if name == "published_at"));
    }

    #[test]
    fn test_split_then_load_round_trips_retained_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("vacancies.csv");
        std::fs::write(
            &input,
            format!(
                "\u{feff}{}\n\
                 Программист,50000,70000,RUR,Москва,2018-07-05T18:19:30+0300\n\
                 Аналитик,,50000,RUR,Казань,2018-03-01T12:00:00+0300\n",
                HEADER
            ),
        )
        .unwrap();

        let out_dir = dir.path().join("years");
        let stats = split_by_year(&input, &out_dir).unwrap();
        // the splitter keeps the row with the empty field, the loader drops it
        assert_eq!(stats.rows, 2);

        let rates = CurrencyTable::new();
        let dataset = YearDataset::load(&out_dir.join("2018.csv"), &rates).unwrap();

        assert_eq!(dataset.year_vacancies.len(), 1);
        let vacancy = &dataset.year_vacancies[0];
        assert_eq!(vacancy.name, "Программист");
        assert_eq!(vacancy.year, 2018);
        assert_eq!(vacancy.salary.salary_from, 50000);
        assert_eq!(vacancy.salary.salary_to, 70000);
        assert_eq!(dataset.city_vacancies[0].city, "Москва");
    }
}
