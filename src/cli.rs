use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "vacstat")]
#[command(about = "Vacancy salary statistics CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a combined vacancy CSV into per-year files
    Split {
        /// Path to the combined CSV dataset
        file: PathBuf,

        /// Directory for the per-year files
        #[arg(short, long, default_value = "years")]
        output: PathBuf,
    },
    /// Compute yearly and city salary statistics from per-year files
    Stats {
        /// Directory with the per-year CSV files
        folder: PathBuf,

        /// Profession to filter by (substring match against vacancy names)
        profession: String,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split { file, output } => {
            commands::split::run(file, output);
        }
        Commands::Stats { folder, profession } => {
            commands::stats::run(folder, profession).await;
        }
    }
}
