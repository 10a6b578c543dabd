//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`chat`, `toast`, `upload`) so components
//! depend on small focused models. Everything here is plain Rust with no
//! DOM access, which keeps the guard and notification logic testable
//! outside the browser.

pub mod chat;
pub mod toast;
pub mod upload;
