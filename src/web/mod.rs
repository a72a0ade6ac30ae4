//! Web server module for csvsheet
//!
//! Provides the upload page and the REST endpoints that preview and convert
//! CSV files.
//!
//! # Features
//!
//! - CSV preview of the first rows as JSON
//! - Whole-file conversion to an XLSX download
//! - Embedded upload page
//!
//! # Usage
//!
//! ```bash
//! csvsheet --port 5000
//! ```

mod assets;
mod routes;
mod server;
mod shutdown;
mod upload;

pub use routes::{app_routes, AppError, AppState, HealthResponse, PreviewResponse, XlsxDownload};
pub use server::{ServerConfig, WebServer};
pub use shutdown::wait_for_shutdown_signal;
pub use upload::{content_disposition, file_stem, xlsx_filename, Upload};

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Number of data rows returned by a preview
pub const PREVIEW_ROWS: usize = 5;

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_PORT, 5000);
        assert_eq!(DEFAULT_BIND, "127.0.0.1");
        assert_eq!(PREVIEW_ROWS, 5);
        assert_eq!(FILE_FIELD, "file");
    }
}
