//! Column type inference
//!
//! A column is typed as a whole from the raw strings that were read:
//! integer, then float, then boolean, falling back to text. Missing values
//! (empty fields and the usual NA markers) keep integer columns from being
//! integer and become [`Cell::Null`] everywhere else.

use super::types::Cell;

/// Field values read as missing
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Inferred type of a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// No value present at all
    Empty,
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnKind {
    /// Infer the kind of a column from its raw values
    pub fn infer(values: &[&str]) -> Self {
        let mut present = values.iter().copied().filter(|v| !is_missing(v)).peekable();
        if present.peek().is_none() {
            return ColumnKind::Empty;
        }
        let complete = values.iter().all(|v| !is_missing(v));

        if complete && values.iter().all(|v| parse_int(v).is_some()) {
            ColumnKind::Integer
        } else if present.clone().all(|v| parse_float(v).is_some()) {
            ColumnKind::Float
        } else if present.all(|v| parse_bool(v).is_some()) {
            ColumnKind::Boolean
        } else {
            ColumnKind::Text
        }
    }

    /// Convert one raw value of a column of this kind
    pub fn convert(self, raw: &str) -> Cell {
        if is_missing(raw) {
            return Cell::Null;
        }
        let cell = match self {
            ColumnKind::Empty => None,
            ColumnKind::Integer => parse_int(raw).map(Cell::Int),
            ColumnKind::Float => parse_float(raw).map(Cell::Float),
            ColumnKind::Boolean => parse_bool(raw).map(Cell::Bool),
            ColumnKind::Text => Some(Cell::Text(raw.to_string())),
        };
        cell.unwrap_or_else(|| Cell::Text(raw.to_string()))
    }
}

pub fn is_missing(raw: &str) -> bool {
    NA_VALUES.contains(&raw)
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
