//! PDF upload storage with content-hash de-duplication.
//!
//! DESIGN
//! ======
//! An upload is validated (type, then size), hashed with SHA-256, and
//! looked up by hash. A known hash returns the existing record without
//! touching disk. A new hash is recorded in `pdf_files` with status
//! `pending`, then written to `{hash[..8]}_{basename}` under the upload
//! directory. The unique index on `file_hash` settles concurrent uploads
//! of the same bytes: the loser of the insert re-reads the winner's row
//! and writes nothing. A failed write deletes the row it just inserted, so
//! every row points at a file and no file is left without a row.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::state::AppState;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Name used when the client sends no usable file name.
pub const FALLBACK_FILENAME: &str = "upload.pdf";

const STORED_HASH_PREFIX_LEN: usize = 8;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("只允许上传 PDF 文件")]
    NotPdf,
    #[error("文件大小超出限制")]
    TooLarge { max: usize },
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The columns of a `pdf_files` row that callers read back.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PdfFileRecord {
    pub id: Uuid,
    pub filename: String,
}

/// Outcome of a store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_id: Uuid,
    pub filename: String,
    /// `true` when the bytes were already on record and nothing was written.
    pub duplicate: bool,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Check content type first, then size against `max` (inclusive).
///
/// # Errors
///
/// Returns `NotPdf` or `TooLarge`.
pub fn validate_pdf(content_type: Option<&str>, size: usize, max: usize) -> Result<(), FileError> {
    if content_type != Some(PDF_CONTENT_TYPE) {
        return Err(FileError::NotPdf);
    }
    if size > max {
        return Err(FileError::TooLarge { max });
    }
    Ok(())
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

/// Strip any directory components (either separator) from a client name.
#[must_use]
pub fn sanitize_filename(raw: Option<&str>) -> String {
    let base = raw
        .unwrap_or_default()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        return FALLBACK_FILENAME.to_owned();
    }
    base.to_owned()
}

/// On-disk name: short hash prefix plus the sanitized original name.
#[must_use]
pub fn stored_filename(hash: &str, original: &str) -> String {
    let prefix = hash.get(..STORED_HASH_PREFIX_LEN).unwrap_or(hash);
    format!("{prefix}_{original}")
}

// =============================================================================
// QUERIES
// =============================================================================

/// Look up a stored file by content hash.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn find_by_hash(pool: &PgPool, file_hash: &str) -> Result<Option<PdfFileRecord>, sqlx::Error> {
    sqlx::query_as::<_, PdfFileRecord>(
        "SELECT id, filename FROM pdf_files WHERE file_hash = $1",
    )
    .bind(file_hash)
    .fetch_optional(pool)
    .await
}

/// Most recently uploaded file, if any.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn latest_file(pool: &PgPool) -> Result<Option<PdfFileRecord>, sqlx::Error> {
    sqlx::query_as::<_, PdfFileRecord>(
        "SELECT id, filename FROM pdf_files ORDER BY created_at DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}

// =============================================================================
// STORE
// =============================================================================

/// Validate, de-duplicate, write, and record one uploaded PDF.
///
/// # Errors
///
/// Returns `NotPdf`/`TooLarge` before any I/O, or an I/O or database error.
pub async fn store_pdf(
    state: &AppState,
    original_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<StoredFile, FileError> {
    validate_pdf(content_type, bytes.len(), state.config.max_upload_bytes)?;

    let file_hash = content_hash(bytes);
    if let Some(existing) = find_by_hash(&state.pool, &file_hash).await? {
        tracing::info!(file_id = %existing.id, filename = %existing.filename, "duplicate upload");
        return Ok(StoredFile { file_id: existing.id, filename: existing.filename, duplicate: true });
    }

    let original = sanitize_filename(original_name);
    let filename = stored_filename(&file_hash, &original);
    let path = state.config.upload_dir.join(&filename);

    #[allow(clippy::cast_possible_wrap)]
    let file_size = bytes.len() as i64;
    let inserted: Option<Uuid> = sqlx::query_scalar(
        r"INSERT INTO pdf_files (id, filename, original_filename, file_path, file_size, file_hash)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (file_hash) DO NOTHING
         RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(&filename)
    .bind(&original)
    .bind(path.to_string_lossy().as_ref())
    .bind(file_size)
    .bind(&file_hash)
    .fetch_optional(&state.pool)
    .await?;

    let Some(file_id) = inserted else {
        let existing = find_by_hash(&state.pool, &file_hash)
            .await?
            .ok_or(FileError::Database(sqlx::Error::RowNotFound))?;
        tracing::info!(file_id = %existing.id, filename = %existing.filename, "duplicate upload (concurrent)");
        return Ok(StoredFile { file_id: existing.id, filename: existing.filename, duplicate: true });
    };

    if let Err(e) = write_upload(&state.config.upload_dir, &filename, bytes).await {
        tracing::error!(%file_id, error = %e, "upload write failed, removing record");
        if let Err(db_err) = sqlx::query("DELETE FROM pdf_files WHERE id = $1")
            .bind(file_id)
            .execute(&state.pool)
            .await
        {
            tracing::error!(%file_id, error = %db_err, "failed to remove record for unwritten upload");
        }
        return Err(FileError::Io(e));
    }

    tracing::info!(%file_id, %filename, size = bytes.len(), "stored upload");
    Ok(StoredFile { file_id, filename, duplicate: false })
}

/// Write `bytes` to `dir/filename`, creating `dir` if needed.
///
/// # Errors
///
/// Returns any I/O error from directory creation or the write.
pub async fn write_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, std::io::Error> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
