// src/loaders/locations.rs
use crate::table::{unique_column_names, CellValue, Table};
use crate::utils::error::LoadError;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const LOCATION_DELIMITER: u8 = b'\t';

// Cell texts treated as missing values.
const NA_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Reads tab-separated location notes; the first line is the header.
pub fn load_location_notes<P: AsRef<Path>>(tsv_filepath: P) -> Result<Table, LoadError> {
    let path = tsv_filepath.as_ref();
    tracing::info!("Loading location notes from {}", path.display());

    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let table = read_delimited(file, LOCATION_DELIMITER)?;

    tracing::info!(
        "Loaded {} location rows with {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Parses delimited records from any reader into a table with inferred column types.
///
/// Short rows are padded with empty cells; a row with more fields than the
/// header is rejected as malformed.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Table, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        tracing::debug!("Delimited input has no header line");
        return Ok(Table::default());
    }
    let width = headers.len();
    let columns = unique_column_names(headers.iter().map(str::to_string));

    let mut raw: Vec<Vec<String>> = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.len() > width {
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(idx as u64 + 2);
            return Err(LoadError::MalformedInput(format!(
                "Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            )));
        }
        raw.push(record.iter().map(str::to_string).collect());
    }
    tracing::trace!("Read {} raw records", raw.len());

    let kinds: Vec<ColumnKind> = (0..width).map(|col| infer_kind(&raw, col)).collect();
    let rows = raw
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .zip(&kinds)
                .map(|(text, kind)| kind.convert(text))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn csv_error(err: csv::Error) -> LoadError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => LoadError::Io(e),
        _ => LoadError::MalformedInput(message),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn convert(self, text: String) -> CellValue {
        if is_missing(&text) {
            return CellValue::Empty;
        }
        let trimmed = text.trim();
        match self {
            ColumnKind::Int => trimmed.parse().map(CellValue::Int).unwrap_or(CellValue::Text(text)),
            ColumnKind::Float => trimmed
                .parse()
                .map(CellValue::Float)
                .unwrap_or(CellValue::Text(text)),
            ColumnKind::Bool => parse_bool(trimmed)
                .map(CellValue::Bool)
                .unwrap_or(CellValue::Text(text)),
            ColumnKind::Text => CellValue::Text(text),
        }
    }
}

fn is_missing(text: &str) -> bool {
    NA_MARKERS.contains(&text)
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Picks the narrowest type every present cell in column `col` parses as.
fn infer_kind(raw: &[Vec<String>], col: usize) -> ColumnKind {
    let present: Vec<&str> = raw
        .iter()
        .filter_map(|r| r.get(col))
        .map(String::as_str)
        .filter(|s| !is_missing(s))
        .map(str::trim)
        .collect();

    if present.is_empty() {
        ColumnKind::Text
    } else if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        ColumnKind::Int
    } else if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if present.iter().all(|s| parse_bool(s).is_some()) {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}
