// src/storage/mod.rs
use crate::report::ExtractionReport;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILENAME: &str = "azmar_report.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the extraction report as pretty-printed JSON
    pub fn save_report(&self, report: &ExtractionReport) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(REPORT_FILENAME);

        let report_str = serde_json::to_string_pretty(report)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, report_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());

        Ok(file_path)
    }
}
