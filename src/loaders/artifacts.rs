// src/loaders/artifacts.rs

// --- Imports ---
use crate::table::{unique_column_names, CellValue, Table};
use crate::utils::error::LoadError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

// --- Constants ---
/// Sheet holding the artifact inventory.
pub const MAIN_CHAMBER_SHEET: &str = "Main Chamber";
/// Rows of title/notes above the header row on that sheet.
pub const ARTIFACT_PREAMBLE_ROWS: usize = 3;

/// Reads the `Main Chamber` sheet of an artifact workbook.
///
/// The first three sheet rows are discarded, the next non-blank row becomes the
/// header, and every later non-blank row becomes a table row. A sheet with no
/// header after the preamble yields an empty table.
pub fn load_artifact_data<P: AsRef<Path>>(excel_filepath: P) -> Result<Table, LoadError> {
    let path = excel_filepath.as_ref();
    tracing::info!("Loading artifact data from {}", path.display());

    // Check existence up front so a missing file is not buried in a format error.
    let meta = std::fs::metadata(path).map_err(|e| LoadError::from_io(path, e))?;
    if !meta.is_file() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Workbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    tracing::debug!("Workbook sheets: {:?}", sheet_names);
    if !sheet_names.iter().any(|name| name == MAIN_CHAMBER_SHEET) {
        tracing::warn!("Sheet '{}' missing from {}", MAIN_CHAMBER_SHEET, path.display());
        return Err(LoadError::SheetNotFound {
            sheet: MAIN_CHAMBER_SHEET.to_string(),
            path: path.to_path_buf(),
        });
    }

    let range = workbook
        .worksheet_range(MAIN_CHAMBER_SHEET)
        .map_err(|e| LoadError::Workbook(e.to_string()))?;

    let table = sheet_to_table(&range, ARTIFACT_PREAMBLE_ROWS);
    tracing::info!(
        "Loaded {} artifact rows with {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Converts a sheet range into a table, skipping `preamble_rows` absolute sheet rows.
pub fn sheet_to_table(range: &Range<Data>, preamble_rows: usize) -> Table {
    // The used range may begin below row 1; rows above it are blank.
    let Some((start_row, _)) = range.start() else {
        tracing::debug!("Sheet is empty");
        return Table::default();
    };

    let mut rows = range
        .rows()
        .enumerate()
        .filter(|(offset, _)| start_row as usize + offset >= preamble_rows)
        .map(|(_, row)| row)
        .filter(|row| !is_blank(row));

    let Some(header) = rows.next() else {
        tracing::debug!("No header row after {} preamble rows", preamble_rows);
        return Table::default();
    };

    let columns = unique_column_names(header.iter().map(header_text));
    let data = rows
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    Table::new(columns, data)
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    })
}

fn header_text(cell: &Data) -> String {
    match to_cell(cell) {
        CellValue::Empty => String::new(),
        other => other.to_string(),
    }
}

fn to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Float(dt.as_f64()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Float(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    /// Lays `rows` out on a sheet starting at absolute row `first_row`.
    fn range_from(first_row: u32, rows: Vec<Vec<Data>>) -> Range<Data> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(1) as u32;
        let last_row = first_row + rows.len() as u32 - 1;
        let mut range = Range::new((first_row, 0), (last_row, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((first_row + r as u32, c as u32), cell);
            }
        }
        range
    }

    #[test]
    fn fourth_row_becomes_header() {
        let range = range_from(
            0,
            vec![
                vec![text("Lost Temple of Azmar"), Data::Empty],
                vec![text("Inventory draft"), Data::Empty],
                vec![text("Do not distribute"), Data::Empty],
                vec![text("Artifact ID"), text("Weight")],
                vec![text("A-1"), Data::Float(1.5)],
                vec![text("A-2"), Data::Int(3)],
            ],
        );
        let table = sheet_to_table(&range, ARTIFACT_PREAMBLE_ROWS);
        assert_eq!(table.columns(), &["Artifact ID".to_string(), "Weight".to_string()]);
        assert_eq!(table.len(), 2);
        let second = table.row(1).unwrap();
        assert_eq!(second.get("Artifact ID"), Some(&CellValue::Text("A-2".into())));
        assert_eq!(second.get("Weight"), Some(&CellValue::Int(3)));
    }

    #[test]
    fn preamble_counts_absolute_sheet_rows() {
        // Used range begins on sheet row 3 (index 2): only one preamble row is inside it.
        let range = range_from(
            2,
            vec![
                vec![text("note")],
                vec![text("Name")],
                vec![text("Idol")],
            ],
        );
        let table = sheet_to_table(&range, ARTIFACT_PREAMBLE_ROWS);
        assert_eq!(table.columns(), &["Name".to_string()]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn sheet_with_too_few_rows_is_empty() {
        let range = range_from(0, vec![vec![text("a")], vec![text("b")], vec![text("c")]]);
        let table = sheet_to_table(&range, ARTIFACT_PREAMBLE_ROWS);
        assert!(table.is_empty());
        assert!(table.columns().is_empty());

        let empty: Range<Data> = Range::empty();
        assert_eq!(sheet_to_table(&empty, ARTIFACT_PREAMBLE_ROWS), Table::default());
    }

    #[test]
    fn blank_rows_and_error_cells() {
        let range = range_from(
            0,
            vec![
                vec![Data::Empty, Data::Empty],
                vec![Data::Empty, Data::Empty],
                vec![Data::Empty, Data::Empty],
                vec![Data::Empty, Data::Empty],
                vec![text("Name"), Data::Empty],
                vec![text("Idol"), Data::Error(calamine::CellErrorType::Div0)],
                vec![text(""), Data::Empty],
                vec![text("Mask"), Data::Bool(true)],
            ],
        );
        let table = sheet_to_table(&range, ARTIFACT_PREAMBLE_ROWS);
        assert_eq!(table.columns(), &["Name".to_string(), "Unnamed: 1".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).unwrap().get("Unnamed: 1"), Some(&CellValue::Empty));
        assert_eq!(table.row(1).unwrap().get("Unnamed: 1"), Some(&CellValue::Bool(true)));
    }

    #[test]
    fn iso_datetime_strings_become_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(to_cell(&Data::DateTimeIso("2024-01-15".into())), CellValue::DateTime(expected));
        assert_eq!(
            to_cell(&Data::DateTimeIso("2024-01-15T00:00:00".into())),
            CellValue::DateTime(expected)
        );
        assert_eq!(to_cell(&Data::DateTimeIso("soon".into())), CellValue::Text("soon".into()));
    }

    #[test]
    fn loads_main_chamber_from_workbook() {
        let table = load_artifact_data(fixture("artifacts.xlsx")).expect("fixture should load");
        assert_eq!(
            table.columns(),
            &[
                "Artifact ID".to_string(),
                "Name".to_string(),
                "Material".to_string(),
                "Weight (kg)".to_string(),
                "Found On".to_string(),
            ]
        );
        assert_eq!(table.len(), 3);

        let first = table.row(0).unwrap();
        assert_eq!(first.get("Artifact ID"), Some(&CellValue::Text("AZ-001".into())));
        assert_eq!(first.get("Weight (kg)"), Some(&CellValue::Float(2.5)));
        let found_on = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(first.get("Found On"), Some(&CellValue::DateTime(found_on)));

        let third = table.row(2).unwrap();
        assert_eq!(third.get("Name"), Some(&CellValue::Text("Obsidian Mirror".into())));
        assert_eq!(third.get("Material"), Some(&CellValue::Empty));
    }

    #[test]
    fn loading_is_repeatable() {
        let a = load_artifact_data(fixture("artifacts.xlsx")).unwrap();
        let b = load_artifact_data(fixture("artifacts.xlsx")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_sheet_is_reported() {
        let err = load_artifact_data(fixture("no_main_chamber.xlsx")).unwrap_err();
        match err {
            LoadError::SheetNotFound { sheet, .. } => assert_eq!(sheet, MAIN_CHAMBER_SHEET),
            other => panic!("expected SheetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn missing_workbook_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifact_data(dir.path().join("artifacts.xlsx")).unwrap_err();
        assert!(err.is_not_found(), "expected FileNotFound, got {:?}", err);
    }

    #[test]
    fn directory_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifact_data(dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }
}
