//! Parallel statistics over a directory of per-year vacancy files.
//!
//! One worker task per file; each worker sends exactly one result message.
//! The coordinator receives exactly as many messages as it spawned
//! workers, so the join cannot miss a completion, then reduces the
//! combined city records once and prints the consolidated report.

use crate::constants::WORKER_WAIT_SECS;
use crate::error::{AppError, Result};
use crate::models::CityVacancy;
use crate::services::{CityStats, CurrencyTable};
use crate::worker;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::info;

/// Consolidated output of one statistics run
#[derive(Debug)]
struct StatsReport {
    salary_by_year: BTreeMap<i32, f64>,
    count_by_year: BTreeMap<i32, usize>,
    prof_salary_by_year: BTreeMap<i32, f64>,
    prof_count_by_year: BTreeMap<i32, usize>,
    city_stats: CityStats,
}

pub async fn run(folder: PathBuf, profession: String) {
    println!(
        "📊 Computing vacancy statistics from {} for '{}'",
        folder.display(),
        profession
    );

    match collect_stats(&folder, &profession).await {
        Ok(report) => print_report(&report, &profession),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn collect_stats(folder: &Path, profession: &str) -> Result<StatsReport> {
    let paths = list_year_files(folder)?;
    if paths.is_empty() {
        return Err(AppError::NotFound(format!(
            "no CSV files in {}",
            folder.display()
        )));
    }

    info!(files = paths.len(), "Starting year workers");

    let rates = Arc::new(CurrencyTable::new());
    let (tx, mut rx) = mpsc::channel(paths.len());
    for path in &paths {
        worker::spawn_year_worker(
            path.clone(),
            profession.to_string(),
            rates.clone(),
            tx.clone(),
        );
    }
    drop(tx);

    let mut salary_by_year = BTreeMap::new();
    let mut count_by_year = BTreeMap::new();
    let mut prof_salary_by_year = BTreeMap::new();
    let mut prof_count_by_year = BTreeMap::new();
    let mut city_batches: Vec<Vec<CityVacancy>> = Vec::with_capacity(paths.len());

    // One receive per spawned worker. City aggregation must not start
    // before every batch has arrived, and counting receives guarantees
    // exactly that without any wait/notify pairing.
    for _ in 0..paths.len() {
        let output = match timeout(Duration::from_secs(WORKER_WAIT_SECS), rx.recv()).await {
            Ok(Some(output)) => output,
            Ok(None) => {
                return Err(AppError::Worker(
                    "result channel closed before all workers reported".to_string(),
                ))
            }
            Err(_) => return Err(AppError::Timeout),
        };

        let report = output
            .result
            .map_err(|e| AppError::Worker(format!("{}: {}", output.path.display(), e)))?;

        let stat = report.stat;
        count_by_year.insert(stat.year, stat.total_count);
        prof_count_by_year.insert(stat.year, stat.prof_count);
        salary_by_year.insert(stat.year, stat.avg_salary);
        prof_salary_by_year.insert(stat.year, stat.avg_prof_salary);
        city_batches.push(report.cities);
    }

    let all_cities: Vec<CityVacancy> = city_batches.into_iter().flatten().collect();
    info!(
        years = count_by_year.len(),
        city_records = all_cities.len(),
        "All workers reported, reducing city statistics"
    );
    let city_stats = CityStats::collect(&all_cities);

    Ok(StatsReport {
        salary_by_year,
        count_by_year,
        prof_salary_by_year,
        prof_count_by_year,
        city_stats,
    })
}

fn list_year_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(folder).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(folder.display().to_string()),
        _ => AppError::Io(err.to_string()),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map_or(false, |ext| ext == "csv")
        })
        .collect();
    paths.sort();

    Ok(paths)
}

fn print_report(report: &StatsReport, profession: &str) {
    println!("\n📅 Average salary by year:");
    for (year, avg) in &report.salary_by_year {
        println!("   {}: {:.2}", year, avg);
    }

    println!("\n📅 Vacancy count by year:");
    for (year, count) in &report.count_by_year {
        println!("   {}: {}", year, count);
    }

    println!("\n📅 Average salary by year for '{}':", profession);
    for (year, avg) in &report.prof_salary_by_year {
        println!("   {}: {:.2}", year, avg);
    }

    println!("\n📅 Vacancy count by year for '{}':", profession);
    for (year, count) in &report.prof_count_by_year {
        println!("   {}: {}", year, count);
    }

    println!("\n🏙️  Average salary by city:");
    for (city, avg) in &report.city_stats.salaries {
        println!("   {}: {:.2}", city, avg);
    }

    println!("\n🏙️  Vacancy share by city:");
    for (city, share) in &report.city_stats.shares {
        println!("   {}: {:.4}", city, share);
    }
}
