//! Fixed-position stack of transient notifications.

use leptos::prelude::*;

use crate::state::toast::ToastState;

/// Renders every visible toast, newest at the bottom. Removal is driven by
/// the sink's timer, not by this component.
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|t| {
                        let class = format!("toast {}", t.kind.css_modifier());
                        view! { <div class=class>{t.message}</div> }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
