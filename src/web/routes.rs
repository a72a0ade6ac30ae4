//! REST API routes for the web server
//!
//! Provides the upload page, CSV preview and conversion, and a health check.

use axum::{
    extract::multipart::{Multipart, MultipartError, MultipartRejection},
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::assets::{index_page, static_file};
use super::upload::{content_disposition, xlsx_filename, Upload};
use super::PREVIEW_ROWS;
use crate::table::{read_csv, Cell, Table, TableError};
use crate::xlsx::{write_table, XLSX_MIME};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub version: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application router
pub fn app_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_page))
        .route("/static/{*path}", get(static_file))
        .route("/preview", post(preview))
        .route("/convert", post(convert))
        .route("/health", get(health_check))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Preview response: column names and the first rows
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub columns: Vec<String>,
    pub data: Vec<Vec<Cell>>,
}

impl From<Table> for PreviewResponse {
    fn from(table: Table) -> Self {
        let (columns, data) = table.into_parts();
        Self { columns, data }
    }
}

/// Parse the first rows of an uploaded CSV
async fn preview(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PreviewResponse>, AppError> {
    let upload = Upload::from_multipart(multipart).await?;
    debug!(filename = %upload.filename, bytes = upload.data.len(), "preview upload");

    let table = run_blocking(move || read_csv(&upload.data, Some(PREVIEW_ROWS))).await?;
    Ok(Json(table.into()))
}

/// Convert an uploaded CSV into an XLSX download
async fn convert(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<XlsxDownload, AppError> {
    let upload = Upload::from_multipart(multipart).await?;
    debug!(filename = %upload.filename, bytes = upload.data.len(), "convert upload");

    let filename = xlsx_filename(&upload.filename);
    let data = run_blocking(move || {
        let table = read_csv(&upload.data, None)?;
        write_table(&table)
    })
    .await?;
    debug!(filename = %filename, bytes = data.len(), "workbook ready");

    Ok(XlsxDownload { data, filename })
}

/// Run table work off the async executor
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, TableError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

/// Converted workbook sent as an attachment
#[derive(Debug)]
pub struct XlsxDownload {
    pub data: Vec<u8>,
    pub filename: String,
}

impl IntoResponse for XlsxDownload {
    fn into_response(self) -> Response {
        let disposition = match HeaderValue::from_str(&content_disposition(&self.filename)) {
            Ok(value) => value,
            Err(e) => return AppError::Internal(e.to_string()).into_response(),
        };

        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.data,
        )
            .into_response()
    }
}

/// API error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Multipart(MultipartError),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(err) => err.status(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::Internal(msg) => msg.clone(),
            AppError::Multipart(err) => err.body_text(),
        }
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Multipart(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let status = self.status();
        let message = self.message();
        warn!(status = status.as_u16(), error = %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
