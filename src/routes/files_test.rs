use super::*;
use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use crate::routes::api_routes;
use crate::state::test_helpers;

#[test]
fn file_error_to_status_maps_validation_to_bad_request() {
    assert_eq!(file_error_to_status(&FileError::NotPdf), StatusCode::BAD_REQUEST);
    assert_eq!(file_error_to_status(&FileError::TooLarge { max: 1 }), StatusCode::BAD_REQUEST);
}

#[test]
fn file_error_to_status_maps_storage_to_internal() {
    let io = FileError::Io(std::io::Error::other("disk full"));
    assert_eq!(file_error_to_status(&io), StatusCode::INTERNAL_SERVER_ERROR);
    let db = FileError::Database(sqlx::Error::RowNotFound);
    assert_eq!(file_error_to_status(&db), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn validation_errors_expose_detail() {
    let (status, Json(body)) = file_error_response(&FileError::NotPdf);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.detail, "只允许上传 PDF 文件");
}

#[test]
fn internal_errors_hide_detail() {
    let (status, Json(body)) = file_error_response(&FileError::Io(std::io::Error::other("/secret/path")));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.detail, "文件处理失败");
}

#[test]
fn upload_response_serializes_expected_keys() {
    let resp = UploadResponse {
        message: "上传成功".into(),
        file_id: "id-1".into(),
        filename: "ab12cd34_report.pdf".into(),
    };
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["message"], "上传成功");
    assert_eq!(json["file_id"], "id-1");
    assert_eq!(json["filename"], "ab12cd34_report.pdf");
}

// =============================================================
// POST /api/upload through the router (no database access)
// =============================================================

const BOUNDARY: &str = "pdfqa-test-boundary";

struct Part<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    content_type: Option<&'a str>,
    data: &'a [u8],
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(ct) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_upload(parts: &[Part<'_>]) -> (StatusCode, serde_json::Value) {
    let tmp = tempfile::tempdir().unwrap();
    let app = api_routes(test_helpers::test_app_state(tmp.path()));
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0, "rejected upload wrote to disk");
    (status, json)
}

fn pdf_part<'a>(name: &'a str, data: &'a [u8]) -> Part<'a> {
    Part { name, filename: Some("report.pdf"), content_type: Some(files::PDF_CONTENT_TYPE), data }
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let (status, body) = post_upload(&[Part { name: "note", filename: None, content_type: None, data: b"hi" }]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "missing `file` field");
}

#[tokio::test]
async fn upload_ignores_pdf_under_other_field_name() {
    let (status, body) = post_upload(&[pdf_part("document", b"%PDF-1.7")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "missing `file` field");
}

#[tokio::test]
async fn upload_rejects_non_pdf_before_reading_body() {
    let part = Part { name: UPLOAD_FIELD, filename: Some("notes.txt"), content_type: Some("text/plain"), data: b"hello" };
    let (status, body) = post_upload(&[part]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "只允许上传 PDF 文件");
}

#[tokio::test]
async fn upload_rejects_part_just_over_limit() {
    // test config caps uploads at 1024 bytes
    let data = vec![b'x'; 1025];
    let (status, body) = post_upload(&[pdf_part(UPLOAD_FIELD, &data)]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "文件大小超出限制");
}

#[tokio::test]
async fn upload_past_body_limit_reports_size_detail() {
    let data = vec![b'x'; 200 * 1024];
    let (status, body) = post_upload(&[pdf_part(UPLOAD_FIELD, &data)]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "文件大小超出限制");
}
