//! Uploaded file extraction and download naming

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartRejection};
use unicode_normalization::UnicodeNormalization;

use super::routes::AppError;
use super::FILE_FIELD;
use crate::xlsx::XLSX_EXTENSION;

const NO_FILE_PART: &str = "No file part";
const NO_SELECTED_FILE: &str = "No selected file";

/// File received in a multipart request
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

impl Upload {
    /// Take the first `file` part that carries a filename
    ///
    /// A request that is not multipart, or has no such part, is a
    /// `No file part` error; an empty filename is `No selected file`.
    pub async fn from_multipart(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Self, AppError> {
        let mut multipart = multipart.map_err(|_| AppError::BadRequest(NO_FILE_PART.to_string()))?;

        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let Some(filename) = field.file_name().map(str::to_string) else {
                continue;
            };
            if filename.is_empty() {
                return Err(AppError::BadRequest(NO_SELECTED_FILE.to_string()));
            }
            let data = field.bytes().await?;
            return Ok(Self { filename, data });
        }

        Err(AppError::BadRequest(NO_FILE_PART.to_string()))
    }
}

/// Filename without its extension
///
/// The extension starts at the last `.` of the final path component; dots
/// leading that component are part of the name (`.env` has no extension).
pub fn file_stem(filename: &str) -> &str {
    let base_start = filename.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
    let base = &filename[base_start..];
    let dots = base.len() - base.trim_start_matches('.').len();

    match base[dots..].rfind('.') {
        Some(idx) => &filename[..base_start + dots + idx],
        None => filename,
    }
}

/// Download name for the converted workbook
pub fn xlsx_filename(filename: &str) -> String {
    format!("{}.{}", file_stem(filename), XLSX_EXTENSION)
}

/// `Content-Disposition` value for an attachment
///
/// Non-ASCII names get an RFC 5987 `filename*` plus an ASCII fallback made
/// by NFKD-decomposing the name and dropping what is left outside ASCII.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .nfkd()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect();

    let plain = filename.chars().all(|c| c.is_ascii() && !c.is_ascii_control());
    if plain {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    }
}
