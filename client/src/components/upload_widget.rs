//! PDF upload button with client-side guards and a per-file status list.

use leptos::prelude::*;

use crate::state::toast::ToastState;
use crate::state::upload::UploadList;

/// Button that opens the native file picker. A picked file is validated,
/// posted to the backend, and reported through the toast context.
#[component]
pub fn UploadWidget() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let files = RwSignal::new(UploadList::default());

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            use crate::net::upload::HttpUploader;
            use crate::state::upload::{UploadFile, submit_upload};

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(picked) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            // Clear so picking the same file again still fires `change`.
            input.set_value("");

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = picked.size() as u64;
            let file = UploadFile::new(picked.name(), picked.type_(), size);

            wasm_bindgen_futures::spawn_local(async move {
                let uploader = HttpUploader::default();
                let _ = submit_upload(file, picked, &uploader, &toasts, |f| {
                    files.update(|list| list.upsert(f));
                    files.get_untracked()
                })
                .await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, toasts);
        }
    };

    view! {
        <div class="upload-widget">
            <label class="btn upload-widget__button">
                "文件上传"
                <input class="upload-widget__input" type="file" on:change=on_change/>
            </label>
            <ul class="upload-widget__list">
                {move || {
                    files
                        .get()
                        .files
                        .into_iter()
                        .map(|f| {
                            let status_class = format!("upload-widget__status upload-widget__status--{}", f.status.label());
                            view! {
                                <li class="upload-widget__item">
                                    <span class="upload-widget__name">{f.name}</span>
                                    <span class=status_class>{f.status.label()}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </div>
    }
}
