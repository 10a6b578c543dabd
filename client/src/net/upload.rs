//! Multipart upload transport.
//!
//! Client-side (hydrate): a real `POST` via `gloo-net` with a `FormData`
//! body. Server-side (SSR): a stub that always fails, since file pickers
//! only exist in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::state::upload::{UploadFile, UploadTransport};

/// Fixed backend endpoint for PDF uploads.
pub const UPLOAD_ENDPOINT: &str = "http://localhost:8000/api/upload";

/// Multipart field name the backend reads the file from.
pub const UPLOAD_FIELD: &str = "file";

/// Posts files to an upload endpoint. No auth headers, no retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpUploader {
    pub endpoint: String,
}

impl Default for HttpUploader {
    fn default() -> Self {
        Self { endpoint: UPLOAD_ENDPOINT.to_owned() }
    }
}

#[cfg(feature = "hydrate")]
impl UploadTransport for HttpUploader {
    type Payload = web_sys::File;

    async fn send(&self, file: &UploadFile, payload: web_sys::File) -> Result<(), String> {
        use super::types::UploadReceipt;

        let form = web_sys::FormData::new().map_err(|e| format!("{e:?}"))?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, &payload, &file.name)
            .map_err(|e| format!("{e:?}"))?;

        let resp = gloo_net::http::Request::post(&self.endpoint)
            .body(form)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("upload failed: {} {}", resp.status(), resp.status_text()));
        }

        match resp.json::<UploadReceipt>().await {
            Ok(receipt) => log::debug!("upload receipt for {}: {receipt:?}", file.name),
            Err(e) => log::debug!("upload response for {} was not JSON: {e}", file.name),
        }
        Ok(())
    }
}

#[cfg(not(feature = "hydrate"))]
impl UploadTransport for HttpUploader {
    type Payload = ();

    async fn send(&self, file: &UploadFile, _payload: ()) -> Result<(), String> {
        let _ = file;
        Err("not available on server".to_owned())
    }
}
