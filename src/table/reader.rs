//! CSV reader
//!
//! Reads comma separated text with a header row into a [`Table`]. Every
//! record must have as many fields as the header; the first one that does
//! not fails the whole read.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};

use super::infer::ColumnKind;
use super::types::{Result, Table, TableError};

/// Read CSV bytes into a table
///
/// With `max_rows` set, reading stops after that many data rows and the rest
/// of the input is never looked at.
pub fn read_csv(data: &[u8], max_rows: Option<usize>) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(TableError::NoColumns);
    }
    let columns = normalize_headers(header.iter());

    let records = reader
        .records()
        .take(max_rows.unwrap_or(usize::MAX))
        .collect::<std::result::Result<Vec<StringRecord>, _>>()?;

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|idx| {
            let values: Vec<&str> = records.iter().map(|r| &r[idx]).collect();
            ColumnKind::infer(&values)
        })
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            record
                .iter()
                .zip(&kinds)
                .map(|(raw, kind)| kind.convert(raw))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// Give every column a unique, non-blank name
///
/// Blank names become `Unnamed: <index>`. The n-th repeat of a name gets a
/// `.n` suffix; a suffixed name that is itself taken is suffixed again, so
/// `a, a, a.1` becomes `a, a.1, a.1.1`.
pub fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    raw.enumerate()
        .map(|(idx, name)| {
            let mut column = if name.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name.to_string()
            };

            let mut count = counts.get(&column).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(column.clone(), count + 1);
                column = format!("{}.{}", column, count);
                count = counts.get(&column).copied().unwrap_or(0);
            }
            counts.insert(column.clone(), count + 1);
            column
        })
        .collect()
}
