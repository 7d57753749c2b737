// src/main.rs
mod extractors;
mod loaders;
mod report;
mod storage;
mod table;
mod utils;

use clap::Parser;
use extractors::JournalFindings;
use loaders::{load_artifact_data, load_location_notes};
use report::{ExtractionReport, SourceReport, TableSummary};
use std::path::{Path, PathBuf};
use storage::StorageManager;
use table::Table;
use utils::{AppError, LoadError};

/// Command Line Interface for the Lost Temple of Azmar data extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Artifact workbook (reads the 'Main Chamber' sheet)
    #[arg(long, default_value = "artifacts.xlsx")]
    artifacts: PathBuf,

    /// Tab-separated location notes
    #[arg(long, default_value = "locations.tsv")]
    locations: PathBuf,

    /// Free-text journal (UTF-8)
    #[arg(long, default_value = "journal.txt")]
    journal: PathBuf,

    /// Number of rows shown in each table preview
    #[arg(short, long, default_value_t = 5)]
    preview_rows: usize,

    /// Directory for a JSON report of the extraction (optional)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Tables
    println!("--- Loading Artifact Data from {} ---", args.artifacts.display());
    let artifacts = load_artifact_data(&args.artifacts);
    print_table_outcome(&args.artifacts, &artifacts, args.preview_rows);

    println!("\n--- Loading Location Notes from {} ---", args.locations.display());
    let locations = load_location_notes(&args.locations);
    print_table_outcome(&args.locations, &locations, args.preview_rows);

    // 4. Journal
    println!("\n--- Processing Journal from {} ---", args.journal.display());
    let journal = extractors::read_journal(&args.journal).map(|text| JournalFindings::scan(&text));
    match &journal {
        Ok(findings) => {
            println!("\nExtracting Dates...");
            println!("Found dates: {:?}", findings.dates);
            println!("\nExtracting Secret Codes...");
            println!("Found codes: {:?}", findings.codes);
        }
        Err(e) => print_load_error(&args.journal, e),
    }

    let report = ExtractionReport::new(
        SourceReport::from_result(&args.artifacts, artifacts.as_ref().map(TableSummary::from)),
        SourceReport::from_result(&args.locations, locations.as_ref().map(TableSummary::from)),
        SourceReport::from_result(&args.journal, journal.as_ref().cloned()),
    );

    // 5. Optional report file
    if let Some(dir) = &args.output_dir {
        let storage = StorageManager::new(dir)?;
        match storage.save_report(&report) {
            Ok(path) => tracing::info!("Saved extraction report to: {}", path.display()),
            Err(e) => tracing::error!("Failed to save extraction report: {}", e),
        }
    }

    let loaded = report.loaded_count();
    tracing::info!("Processing finished. Sources loaded: {} of 3", loaded);

    if loaded == 0 {
        return Err(AppError::Processing("No input source could be loaded".to_string()));
    }

    Ok(())
}

fn print_table_outcome(path: &Path, result: &Result<Table, LoadError>, preview_rows: usize) {
    match result {
        Ok(table) => {
            println!("Successfully loaded table. First {} rows:", preview_rows);
            print!("{}", table.head(preview_rows));
            println!("\nTable Info:");
            println!("{} entries, {} columns", table.len(), table.columns().len());
            for (idx, col) in table.info().iter().enumerate() {
                println!("  {:>2}  {:<24} {:>5} non-null  {}", idx, col.name, col.non_null, col.dtype);
            }
        }
        Err(e) => print_load_error(path, e),
    }
}

fn print_load_error(path: &Path, err: &LoadError) {
    match err {
        LoadError::FileNotFound(_) => {
            tracing::warn!("Input missing: {}", path.display());
            println!("Error: File not found at {}", path.display());
        }
        other => {
            tracing::error!("Failed to process {}: {}", path.display(), other);
            println!("Error: {}", other);
        }
    }
}
