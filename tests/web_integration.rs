//! Web API integration tests
//!
//! Drives the real router with in-memory requests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use calamine::{Reader, Xlsx};
use csvsheet::{ServerConfig, WebServer, SHEET_NAME, XLSX_MIME};
use serde_json::Value;
use std::io::Cursor;
use tower::ServiceExt;

const BOUNDARY: &str = "csvsheet-test-boundary";

fn router() -> Router {
    WebServer::with_config(ServerConfig::default()).build_router()
}

/// One multipart part; `filename: None` omits the attribute entirely
fn part(name: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
    let mut body = format!("--{}\r\n", BOUNDARY).into_bytes();
    match filename {
        Some(filename) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n",
                name, filename
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        ),
    }
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");
    body
}

fn multipart_request(path: &str, parts: &[Vec<u8>]) -> Request<Body> {
    let mut body: Vec<u8> = parts.concat();
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

fn csv_request(path: &str, filename: &str, content: &[u8]) -> Request<Body> {
    multipart_request(path, &[part("file", Some(filename), content)])
}

async fn send(request: Request<Body>) -> Response {
    router().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn read_sheet(bytes: Vec<u8>) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[tokio::test]
async fn test_index_page() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn test_static_assets() {
    let request = Request::builder()
        .uri("/static/app.js")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(request).await.status(), StatusCode::OK);

    let request = Request::builder()
        .uri("/static/nope.js")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(request).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_preview() {
    let response = send(csv_request("/preview", "test.csv", b"col1,col2\n1,2\n3,4")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["columns"], serde_json::json!(["col1", "col2"]));
    assert_eq!(json["data"], serde_json::json!([[1, 2], [3, 4]]));
}

#[tokio::test]
async fn test_preview_first_five_rows() {
    let data = b"id,name\n1,a\n2,b\n3,c\n4,d\n5,e\n6,f\n7,g\n";
    let response = send(csv_request("/preview", "rows.csv", data)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], serde_json::json!([1, "a"]));
    assert_eq!(rows[4], serde_json::json!([5, "e"]));
}

#[tokio::test]
async fn test_preview_missing_values_are_null() {
    let response = send(csv_request("/preview", "gaps.csv", b"a,b\n1,\n2.5,x\n")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([[1.0, null], [2.5, "x"]]));
}

#[tokio::test]
async fn test_preview_without_file_field() {
    let request = multipart_request("/preview", &[part("other", Some("x.csv"), b"a\n1\n")]);
    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file part");
}

#[tokio::test]
async fn test_preview_file_field_without_filename() {
    let request = multipart_request("/preview", &[part("file", None, b"a\n1\n")]);
    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_preview_empty_filename() {
    let response = send(csv_request("/preview", "", b"a\n1\n")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_preview_not_multipart() {
    let request = Request::builder()
        .method("POST")
        .uri("/preview")
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from("a,b\n1,2\n"))
        .unwrap();
    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No file part");
}

#[tokio::test]
async fn test_preview_malformed_csv() {
    let response = send(csv_request("/preview", "bad.csv", b"a,b\n1,2,3\n")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_preview_empty_file() {
    let response = send(csv_request("/preview", "empty.csv", b"")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "No columns to parse from file"
    );
}

#[tokio::test]
async fn test_convert() {
    let response = send(csv_request("/convert", "test.csv", b"col1,col2\n1,2\n3,4")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_MIME);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"test.xlsx\""
    );

    let rows = read_sheet(body_bytes(response).await);
    assert_eq!(
        rows,
        vec![vec!["col1", "col2"], vec!["1", "2"], vec!["3", "4"]]
    );
}

#[tokio::test]
async fn test_convert_reads_all_rows() {
    let mut data = String::from("n,label\n");
    for i in 0..50 {
        data.push_str(&format!("{},row {}\n", i, i));
    }
    let response = send(csv_request("/convert", "many.csv", data.as_bytes())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let rows = read_sheet(body_bytes(response).await);
    assert_eq!(rows.len(), 51);
    assert_eq!(rows[50], vec!["49", "row 49"]);
}

#[tokio::test]
async fn test_convert_filename_keeps_inner_dots() {
    let response = send(csv_request("/convert", "a.b.csv", b"x\n1\n")).await;
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"a.b.xlsx\""
    );

    let response = send(csv_request("/convert", "report.csv", b"x\n1\n")).await;
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report.xlsx\""
    );
}

#[tokio::test]
async fn test_convert_without_file_field() {
    let request = multipart_request("/convert", &[part("other", Some("x.csv"), b"a\n1\n")]);
    let response = send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_convert_empty_filename() {
    let response = send(csv_request("/convert", "", b"a\n1\n")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_convert_malformed_csv() {
    let response = send(csv_request("/convert", "bad.csv", b"a,b\n1,2\n3,4,5\n")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_convert_invalid_utf8() {
    let response = send(csv_request("/convert", "latin1.csv", b"a,b\n\xe9t\xe9,1\n")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_convert_larger_than_default_body_limit() {
    let row = "0123456789,abcdefghijklmnopqrstuvwxyz\n";
    let mut data = String::from("num,text\n");
    while data.len() < 3 * 1024 * 1024 {
        data.push_str(row);
    }
    let response = send(csv_request("/convert", "big.csv", data.as_bytes())).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_limit_rejects_large_body() {
    let router = WebServer::with_config(ServerConfig::default().with_upload_limit(1024))
        .build_router();
    let data = "a\n".repeat(4096);
    let response = router
        .oneshot(csv_request("/preview", "big.csv", data.as_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_limit_allows_small_body() {
    let router = WebServer::with_config(ServerConfig::default().with_upload_limit(64 * 1024))
        .build_router();
    let response = router
        .oneshot(csv_request("/preview", "small.csv", b"a,b\n1,2\n"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_convert_too_many_columns() {
    let header: Vec<String> = (0..16_385).map(|i| format!("c{}", i)).collect();
    let data = format!("{}\n", header.join(","));
    let response = send(csv_request("/convert", "wide.csv", data.as_bytes())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("This sheet is too large!"));
    assert!(error.contains("1, 16385"));
}

#[tokio::test]
async fn test_convert_non_ascii_filename() {
    let response = send(csv_request("/convert", "données.csv", b"x\n1\n")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"donnees.xlsx\"; filename*=UTF-8''donn%C3%A9es.xlsx"
    );
}
