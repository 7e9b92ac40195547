use crate::services;
use std::path::PathBuf;

pub fn run(file: PathBuf, output: PathBuf) {
    println!("📂 Splitting {} by publication year", file.display());

    match services::split_by_year(&file, &output) {
        Ok(stats) => {
            println!(
                "✅ Wrote {} rows into {} per-year files under {}",
                stats.rows,
                stats.files,
                output.display()
            );
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
