// src/utils/error.rs
#![allow(dead_code)]
use std::path::{Path, PathBuf};
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Sheet '{}' not found in workbook {}", .sheet, .path.display())]
    SheetNotFound { sheet: String, path: PathBuf },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Maps an I/O failure on `path`, keeping "not found" distinguishable.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
            _ => LoadError::Io(err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::FileNotFound(_))
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Loading failed: {0}")]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
