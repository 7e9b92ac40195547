//! Per-file statistics worker.
//!
//! The stats command spawns one worker per per-year file. A worker owns
//! its file exclusively: it loads the dataset, reduces it to a yearly
//! stat, and reports exactly one message back to the coordinator with the
//! stat and the file's city records. Failures travel inside that message
//! rather than disappearing into a dead task.

use crate::error::{AppError, Result};
use crate::models::CityVacancy;
use crate::services::{CurrencyTable, YearDataset, YearStat};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};

/// Everything a single worker reports back to the coordinator
#[derive(Debug)]
pub struct WorkerOutput {
    /// The per-year file this worker owned
    pub path: PathBuf,

    /// The file's statistics, or the error that stopped the worker
    pub result: Result<YearReport>,
}

/// Aggregated outcome of one per-year file
#[derive(Debug)]
pub struct YearReport {
    pub stat: YearStat,
    pub cities: Vec<CityVacancy>,
}

/// Spawn a worker task for one per-year file.
///
/// The parse and the reduction run on the blocking pool; the worker sends
/// exactly one `WorkerOutput` on `tx` when it is done.
pub fn spawn(
    path: PathBuf,
    profession: String,
    rates: Arc<CurrencyTable>,
    tx: Sender<WorkerOutput>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let work_path = path.clone();
        let result =
            match task::spawn_blocking(move || process_file(&work_path, &profession, &rates)).await
            {
                Ok(result) => result,
                Err(err) => Err(AppError::Worker(format!("worker panicked: {}", err))),
            };

        if tx.send(WorkerOutput { path, result }).await.is_err() {
            warn!("Coordinator went away before this worker reported");
        }
    })
}

fn process_file(path: &Path, profession: &str, rates: &CurrencyTable) -> Result<YearReport> {
    let dataset = YearDataset::load(path, rates)?;

    // The first record decides the year, even if later rows disagree; an
    // empty file falls back to its <year>.csv name.
    let year = match dataset.year_vacancies.first() {
        Some(first) => first.year,
        None => year_from_file_name(path)?,
    };

    let stat = YearStat::collect(year, &dataset.year_vacancies, profession);
    info!(
        file = %path.display(),
        vacancies = stat.total_count,
        "Aggregated year {}",
        stat.year
    );

    Ok(YearReport {
        stat,
        cities: dataset.city_vacancies,
    })
}

fn year_from_file_name(path: &Path) -> Result<i32> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse().ok())
        .ok_or_else(|| {
            AppError::Parse(format!(
                "cannot infer a year from file name {}",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "name,salary_from,salary_to,salary_currency,area_name,published_at";

    fn write_file(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "\u{feff}{}", HEADER).unwrap();
        for row in rows {
            write!(file, "\n{}", row).unwrap();
        }
        path
    }

    #[test]
    fn test_first_record_decides_the_year() {
        let dir = tempfile::tempdir().unwrap();
        // the file name disagrees with the rows on purpose
        let path = write_file(
            dir.path(),
            "2020.csv",
            &[
                "Программист,50000,70000,RUR,Москва,2018-07-05T18:19:30+0300",
                "Аналитик,40000,50000,RUR,Казань,2019-03-01T12:00:00+0300",
            ],
        );

        let rates = CurrencyTable::new();
        let report = process_file(&path, "Программист", &rates).unwrap();

        assert_eq!(report.stat.year, 2018);
        assert_eq!(report.stat.total_count, 2);
        assert_eq!(report.cities.len(), 2);
    }

    #[test]
    fn test_empty_file_takes_the_year_from_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "2007.csv", &[]);

        let rates = CurrencyTable::new();
        let report = process_file(&path, "Программист", &rates).unwrap();

        assert_eq!(report.stat.year, 2007);
        assert_eq!(report.stat.total_count, 0);
        assert_eq!(report.stat.avg_salary, 0.0);
        assert!(report.cities.is_empty());
    }

    #[test]
    fn test_empty_file_without_a_year_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "misc.csv", &[]);

        let rates = CurrencyTable::new();
        let err = process_file(&path, "Программист", &rates).unwrap_err();

        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_worker_reports_errors_in_its_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "2018.csv",
            &["Программист,50000,70000,XYZ,Москва,2018-07-05T18:19:30+0300"],
        );

        let rates = Arc::new(CurrencyTable::new());
        let (tx, mut rx) = tokio::sync::mpsc::channel(1);

        spawn(path.clone(), "Программист".to_string(), rates, tx);

        let output = rx.recv().await.unwrap();
        assert_eq!(output.path, path);
        assert!(matches!(
            output.result,
            Err(AppError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }
}
