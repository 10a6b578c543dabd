//! Chat box: a text field, the upload widget, and a submit button.

use leptos::prelude::*;

use crate::components::upload_widget::UploadWidget;
use crate::state::chat::ChatState;

/// Text input plus submit. Submit only logs the current text; the upload
/// widget beside it works independently of what was typed.
#[component]
pub fn ChatBox() -> impl IntoView {
    let chat = RwSignal::new(ChatState::default());

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        chat.update(|c| c.set_input(value));
    };

    let on_submit = move |_| {
        chat.with_untracked(|c| {
            let _ = c.submit();
        });
    };

    view! {
        <div class="chat-box">
            <input
                class="chat-box__input"
                type="text"
                prop:value=move || chat.with(|c| c.input.clone())
                on:input=on_input
            />
            <UploadWidget/>
            <button class="btn btn--primary chat-box__submit" on:click=on_submit>
                "Submit"
            </button>
        </div>
    }
}
