//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat box, the upload widget, and the toast stack,
//! reading and writing shared state from Leptos context providers.

pub mod chat_box;
pub mod toast_stack;
pub mod upload_widget;
