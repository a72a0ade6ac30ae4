//! Embedded upload page and its static files

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Serve the upload page
pub async fn index_page() -> Response {
    serve_asset("index.html")
}

/// Serve a file below `/static/`
pub async fn static_file(Path(path): Path<String>) -> Response {
    serve_asset(&format!("static/{}", path))
}

fn serve_asset(path: &str) -> Response {
    match Assets::get(path) {
        Some(file) => (
            [(header::CONTENT_TYPE, file.metadata.mimetype().to_string())],
            file.data.into_owned(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
