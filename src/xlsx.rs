//! XLSX writer for parsed tables
//!
//! Writes a [`Table`] to a single worksheet held in memory: header row on
//! top, data from the second row, no index column.

use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet};

use crate::table::{Cell, Result, Table, TableError, MAX_SHEET_SIZE};

/// Worksheet name used for converted tables
pub const SHEET_NAME: &str = "Sheet1";

/// MIME type of an XLSX workbook
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// File extension of an XLSX workbook, without the dot
pub const XLSX_EXTENSION: &str = "xlsx";

/// Largest integer magnitude a spreadsheet number holds exactly (2^53)
pub const MAX_EXACT_INT: i64 = 1 << 53;

/// Serialize a table into XLSX bytes
pub fn write_table(table: &Table) -> Result<Vec<u8>> {
    let rows = table.height() + 1;
    let columns = table.width();
    if rows > MAX_SHEET_SIZE.0 || columns > MAX_SHEET_SIZE.1 {
        return Err(TableError::SheetTooLarge { rows, columns });
    }

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    // Bounds were checked above, so the index casts cannot truncate.
    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col as ColNum, name, &header_format)?;
    }
    for (row, cells) in table.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            write_cell(sheet, row as RowNum + 1, col as ColNum, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(sheet: &mut Worksheet, row: RowNum, col: ColNum, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Null => {}
        Cell::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Cell::Int(i) if i.unsigned_abs() > MAX_EXACT_INT as u64 => {
            sheet.write_string(row, col, &i.to_string())?;
        }
        Cell::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Cell::Float(f) if f.is_nan() => {}
        Cell::Float(f) if f.is_infinite() => {
            let text = if f.is_sign_positive() { "inf" } else { "-inf" };
            sheet.write_string(row, col, text)?;
        }
        Cell::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Cell::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}
