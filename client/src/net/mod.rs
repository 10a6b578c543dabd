//! Networking modules for the upload endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! `upload` posts accepted files as multipart form data, and `types`
//! defines the response body the backend sends back.

pub mod types;
pub mod upload;
