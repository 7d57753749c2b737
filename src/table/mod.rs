// src/table/mod.rs
#![allow(dead_code)]
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

// --- Data Structures ---

/// A single cell as read from a workbook or delimited file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) if dt.time() == NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Empty => f.write_str("NaN"),
        }
    }
}

/// Ordered rows sharing a set of uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [CellValue],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    pub fn values(&self) -> &'a [CellValue] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> + 'a {
        let (columns, values) = (self.columns, self.values);
        columns.iter().map(String::as_str).zip(values.iter())
    }
}

/// Summary of one column, in the spirit of a dataframe `info()` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: &'static str,
}

impl Table {
    /// Builds a table; rows shorter than the header are padded with `Empty`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, CellValue::Empty);
                }
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<Row<'_>> {
        self.rows.get(idx).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// First `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn info(&self) -> Vec<ColumnInfo> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&CellValue> = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(idx))
                    .filter(|c| !c.is_empty())
                    .collect();
                ColumnInfo {
                    name: name.clone(),
                    non_null: cells.len(),
                    dtype: dtype_of(&cells),
                }
            })
            .collect()
    }
}

fn dtype_of(cells: &[&CellValue]) -> &'static str {
    if cells.is_empty() {
        return "empty";
    }
    if cells.iter().all(|c| matches!(c, CellValue::Int(_))) {
        "int64"
    } else if cells
        .iter()
        .all(|c| matches!(c, CellValue::Int(_) | CellValue::Float(_)))
    {
        "float64"
    } else if cells.iter().all(|c| matches!(c, CellValue::Bool(_))) {
        "bool"
    } else if cells.iter().all(|c| matches!(c, CellValue::DateTime(_))) {
        "datetime64"
    } else {
        "object"
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "Empty table\nColumns: []\nIndex: []");
        }

        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(ToString::to_string).collect())
            .collect();

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                rendered
                    .iter()
                    .filter_map(|r| r.get(idx))
                    .map(|s| s.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:>w$}", "", w = index_width)?;
        for (name, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", name, w = *w)?;
        }
        writeln!(f)?;

        for (i, row) in rendered.iter().enumerate() {
            write!(f, "{:>w$}", i, w = index_width)?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Turns raw header cells into unique column names.
///
/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ... appended
/// until the name is unused.
pub fn unique_column_names<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name
        };

        let mut candidate = base.clone();
        while seen.contains(&candidate) {
            let n = counts.entry(base.clone()).or_insert(0);
            *n += 1;
            candidate = format!("{}.{}", base, n);
        }
        seen.insert(candidate.clone());
        names.push(candidate);
    }
    names
}
