//! csvsheet - preview uploaded CSV files and convert them to XLSX
//!
//! A small web service: `POST /preview` returns the first rows of an
//! uploaded CSV as JSON, `POST /convert` returns the whole file as a
//! single-sheet XLSX download, and `GET /` serves the upload page.
//!
//! # Modules
//!
//! - [`table`] - CSV parsing into typed tables
//! - [`xlsx`] - Table to workbook serialization
//! - [`web`] - HTTP routes and server
//! - [`cli`] - Command-line flags

pub mod cli;
pub mod table;
pub mod web;
pub mod xlsx;

pub use cli::{exit_codes, Cli};
pub use table::{read_csv, Cell, ColumnKind, Table, TableError};
pub use web::{
    app_routes, wait_for_shutdown_signal, AppError, AppState, ServerConfig, Upload, WebServer,
    PREVIEW_ROWS,
};
pub use xlsx::{write_table, SHEET_NAME, XLSX_EXTENSION, XLSX_MIME};
