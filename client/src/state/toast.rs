//! Transient toast notifications.
//!
//! DESIGN
//! ======
//! Event handlers never reach for a global message API. They receive a
//! `NotificationSink` and call `notify`; the app provides an
//! `RwSignal<ToastState>` sink via context, and tests provide a recorder.
//! In the browser each toast removes itself after `TOAST_TTL_MS`.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;

/// How long a toast stays visible.
pub const TOAST_TTL_MS: u32 = 3_000;

/// Oldest toasts are dropped once the queue holds this many.
pub const MAX_VISIBLE_TOASTS: usize = 5;

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// BEM modifier used by the toast stack markup.
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }
}

/// A single visible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Queue of visible toasts, oldest first.
#[derive(Clone, Debug)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl Default for ToastState {
    fn default() -> Self {
        Self { toasts: Vec::new(), next_id: 1 }
    }
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.toasts.len() == MAX_VISIBLE_TOASTS {
            self.toasts.remove(0);
        }
        self.toasts.push(Toast { id, kind, message: message.into() });
        id
    }

    /// Remove a toast by id. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}

/// Destination for user-visible notifications.
pub trait NotificationSink {
    fn notify(&self, kind: ToastKind, message: String);
}

impl NotificationSink for RwSignal<ToastState> {
    fn notify(&self, kind: ToastKind, message: String) {
        let mut id = 0;
        self.update(|state| id = state.push(kind, message));

        #[cfg(feature = "hydrate")]
        {
            let toasts = *self;
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
                toasts.update(|state| {
                    state.dismiss(id);
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}
