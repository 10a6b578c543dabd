//! PDF upload and service status routes.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use crate::services::files::{self, FileError};
use crate::state::AppState;

/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub message: String,
    pub file_id: String,
    pub filename: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub has_pdf: bool,
    pub latest_file: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody { detail: detail.into() }))
}

/// A body that trips the request size limit is reported like any other
/// oversize upload.
fn multipart_error(err: &MultipartError, max: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return file_error_response(&FileError::TooLarge { max });
    }
    api_error(err.status(), err.body_text())
}

/// `POST /api/upload` — store one PDF from the `file` multipart field.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<UploadResponse>, ApiError> {
    let max = state.config.max_upload_bytes;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, max))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        if content_type.as_deref() != Some(files::PDF_CONTENT_TYPE) {
            return Err(file_error_response(&FileError::NotPdf));
        }
        let bytes = field.bytes().await.map_err(|e| multipart_error(&e, max))?;

        let stored = files::store_pdf(&state, file_name.as_deref(), content_type.as_deref(), &bytes)
            .await
            .map_err(|e| file_error_response(&e))?;

        let message = if stored.duplicate { "文件已存在" } else { "上传成功" };
        return Ok(Json(UploadResponse {
            message: message.to_owned(),
            file_id: stored.file_id.to_string(),
            filename: stored.filename,
        }));
    }

    Err(api_error(StatusCode::BAD_REQUEST, format!("missing `{UPLOAD_FIELD}` field")))
}

/// `GET /api/status` — liveness plus whether any PDF has been stored.
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    let latest = files::latest_file(&state.pool).await.map_err(|e| {
        tracing::error!(error = %e, "status query failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(StatusResponse {
        status: "running",
        has_pdf: latest.is_some(),
        latest_file: latest.map(|f| f.filename),
    }))
}

pub(crate) fn file_error_to_status(err: &FileError) -> StatusCode {
    match err {
        FileError::NotPdf | FileError::TooLarge { .. } => StatusCode::BAD_REQUEST,
        FileError::Io(_) | FileError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn file_error_response(err: &FileError) -> ApiError {
    let status = file_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "upload failed");
        return api_error(status, "文件处理失败");
    }
    api_error(status, err.to_string())
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
