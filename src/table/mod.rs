//! Table module for CSV input
//!
//! Parses uploaded CSV bytes into an in-memory [`Table`] of typed cells.
//!
//! # Features
//!
//! - **Reader** ([`reader`]) - Header normalization and row-limited reads
//! - **Inference** ([`infer`]) - Per-column integer/float/boolean/text typing

pub mod infer;
pub mod reader;
mod types;

// Re-export public API
pub use infer::{ColumnKind, NA_VALUES};
pub use reader::{normalize_headers, read_csv};
pub use types::{Cell, Result, Table, TableError, MAX_SHEET_SIZE};
