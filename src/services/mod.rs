//! Service layer for upload storage.
//!
//! DESIGN
//! ======
//! Services own validation, hashing, disk writes, and SQL. Route handlers
//! only decode the multipart body and map service errors to HTTP statuses.

pub mod files;
