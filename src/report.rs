// src/report.rs
use crate::extractors::JournalFindings;
use crate::table::{ColumnInfo, Table};
use crate::utils::error::LoadError;
use serde::Serialize;
use std::path::Path;

/// Shape of a loaded table, without its cell data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        Self {
            rows: table.len(),
            columns: table.info(),
        }
    }
}

/// Outcome of processing one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceReport<T> {
    Loaded { path: String, data: T },
    NotFound { path: String },
    Failed { path: String, error: String },
}

impl<T> SourceReport<T> {
    pub fn from_result(path: &Path, result: Result<T, &LoadError>) -> Self {
        let path = path.display().to_string();
        match result {
            Ok(data) => SourceReport::Loaded { path, data },
            Err(LoadError::FileNotFound(_)) => SourceReport::NotFound { path },
            Err(e) => SourceReport::Failed {
                path,
                error: e.to_string(),
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SourceReport::Loaded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub artifacts: SourceReport<TableSummary>,
    pub locations: SourceReport<TableSummary>,
    pub journal: SourceReport<JournalFindings>,
    pub extraction_timestamp: String,
}

impl ExtractionReport {
    pub fn new(
        artifacts: SourceReport<TableSummary>,
        locations: SourceReport<TableSummary>,
        journal: SourceReport<JournalFindings>,
    ) -> Self {
        Self {
            artifacts,
            locations,
            journal,
            extraction_timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn loaded_count(&self) -> usize {
        [
            self.artifacts.is_loaded(),
            self.locations.is_loaded(),
            self.journal.is_loaded(),
        ]
        .iter()
        .filter(|loaded| **loaded)
        .count()
    }
}
