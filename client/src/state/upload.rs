//! Upload widget model: client-side guards, status machine, and the
//! guard-then-transmit-then-notify flow.
//!
//! DESIGN
//! ======
//! `submit_upload` is generic over the transport and the notification
//! sink, so the browser wires in `HttpUploader` + the toast signal while
//! tests wire in recorders. Guards run synchronously before the transport
//! is touched; a rejected file never produces a request.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::fmt;

use super::toast::{NotificationSink, ToastKind};

/// The only MIME type the widget accepts.
pub const PDF_MIME: &str = "application/pdf";

/// Files must be strictly smaller than this many bytes.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Lifecycle of one selected file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    NotStarted,
    Uploading,
    Done,
    Error,
}

impl UploadStatus {
    /// `not-started → uploading → {done, error}`; terminal states stay put.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Uploading) | (Self::Uploading, Self::Done) | (Self::Uploading, Self::Error)
        )
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Uploading => "uploading",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

/// A user-selected file as the widget sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub uid: String,
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub status: UploadStatus,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            uid: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            mime: mime.into(),
            size,
            status: UploadStatus::NotStarted,
        }
    }

    /// Move to `next` if the status machine allows it.
    pub fn advance(&mut self, next: UploadStatus) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        true
    }
}

/// Why a file was refused before any network traffic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadRejection {
    NotPdf,
    TooLarge,
}

impl UploadRejection {
    /// Toast text shown for the rejection.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NotPdf => "只能上传 PDF 文件!",
            Self::TooLarge => "文件大小不能超过 10MB!",
        }
    }
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Run the MIME guard, then the size guard.
///
/// # Errors
///
/// Returns the first guard that fails.
pub fn validate_upload(file: &UploadFile) -> Result<(), UploadRejection> {
    if file.mime != PDF_MIME {
        return Err(UploadRejection::NotPdf);
    }
    if file.size >= MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge);
    }
    Ok(())
}

/// Files the widget has accepted, in selection order.
#[derive(Clone, Debug, Default)]
pub struct UploadList {
    pub files: Vec<UploadFile>,
}

impl UploadList {
    /// Insert `file`, or replace the entry with the same `uid`.
    pub fn upsert(&mut self, file: &UploadFile) {
        match self.files.iter_mut().find(|f| f.uid == file.uid) {
            Some(existing) => existing.clone_from(file),
            None => self.files.push(file.clone()),
        }
    }
}

/// Sends an accepted file somewhere. `Payload` is whatever the transport
/// needs beyond the metadata (a browser `File` for the HTTP uploader).
pub trait UploadTransport {
    type Payload;

    fn send(&self, file: &UploadFile, payload: Self::Payload) -> impl Future<Output = Result<(), String>>;
}

/// Debug line for a status change, or `None` while the file is uploading.
#[must_use]
pub fn status_log_line(file: &UploadFile, list: &UploadList) -> Option<String> {
    if file.status == UploadStatus::Uploading {
        return None;
    }
    let names: Vec<String> = list
        .files
        .iter()
        .map(|f| format!("{} ({})", f.name, f.status.label()))
        .collect();
    Some(format!("upload {} {}: file list [{}]", file.name, file.status.label(), names.join(", ")))
}

/// React to a status change: log the file list for non-uploading states
/// and toast the terminal ones.
pub fn handle_status_change<N: NotificationSink>(file: &UploadFile, list: &UploadList, sink: &N) {
    if let Some(line) = status_log_line(file, list) {
        log::debug!("{line}");
    }
    match file.status {
        UploadStatus::Done => sink.notify(ToastKind::Success, format!("{} file uploaded successfully", file.name)),
        UploadStatus::Error => sink.notify(ToastKind::Error, format!("{} file upload failed.", file.name)),
        UploadStatus::NotStarted | UploadStatus::Uploading => {}
    }
}

/// Guard, transmit, and report one file.
///
/// `on_status` sees the file after every transition, mirrors it into the
/// caller's file list, and returns a snapshot of that list. Returns the
/// terminal status.
///
/// # Errors
///
/// Returns the rejection if a guard fails; the transport is not called and
/// an error toast has already been raised.
pub async fn submit_upload<T, N, F>(
    mut file: UploadFile,
    payload: T::Payload,
    transport: &T,
    sink: &N,
    mut on_status: F,
) -> Result<UploadStatus, UploadRejection>
where
    T: UploadTransport,
    N: NotificationSink,
    F: FnMut(&UploadFile) -> UploadList,
{
    if let Err(rejection) = validate_upload(&file) {
        log::warn!("upload rejected for {}: {rejection:?}", file.name);
        sink.notify(ToastKind::Error, rejection.message().to_owned());
        return Err(rejection);
    }

    file.advance(UploadStatus::Uploading);
    let list = on_status(&file);
    handle_status_change(&file, &list, sink);

    let next = match transport.send(&file, payload).await {
        Ok(()) => UploadStatus::Done,
        Err(e) => {
            log::error!("upload of {} failed: {e}", file.name);
            UploadStatus::Error
        }
    };
    file.advance(next);
    let list = on_status(&file);
    handle_status_change(&file, &list, sink);

    Ok(file.status)
}
