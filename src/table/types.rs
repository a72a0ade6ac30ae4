//! Common types for the table module

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Largest sheet the XLSX container can hold (rows, columns)
pub const MAX_SHEET_SIZE: (usize, usize) = (1_048_576, 16_384);

/// Table error types
#[derive(Debug, Error)]
pub enum TableError {
    #[error("No columns to parse from file")]
    NoColumns,

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error(
        "This sheet is too large! Your sheet size is: {rows}, {columns} \
         Max sheet size is: 1048576, 16384"
    )]
    SheetTooLarge { rows: usize, columns: usize },

    #[error("{0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, TableError>;

/// A single typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_none(),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Int(i) => serializer.serialize_i64(*i),
            Cell::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Cell::Float(_) => serializer.serialize_none(),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Parsed tabular data: named columns and rows aligned to them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table; every row must have one cell per column
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Split into columns and rows
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }
}
