//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These mirror the JSON the server writes from `POST /api/upload`. The
//! client only logs them; every field is optional so an unexpected body
//! never turns a 2xx into a failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Body of a successful upload response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Body of a rejected upload response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadErrorBody {
    pub detail: String,
}
