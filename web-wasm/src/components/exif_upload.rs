//! EXIFアップロードコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use puzzle_tools_common::{FileUpload, PanelId, ToolInput};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use crate::app::BoardActions;
use crate::surface::SignalSurface;

#[component]
pub fn ExifUpload(surface: SignalSurface, actions: BoardActions) -> impl IntoView {
    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match read_file(file).await {
                Ok(upload) => actions.dispatch(PanelId::ExifUpload, ToolInput::File(upload)),
                Err(e) => tracing::warn!("failed to read file: {:?}", e),
            }
        });
    };

    view! {
        <form class="tool-form" id=PanelId::ExifUpload.as_str()>
            <label>"Exif"</label>
            // 世代が変わるたびに作り直して選択を消す
            {move || {
                let _ = surface.file_generation();
                view! { <input type="file" accept="image/*" on:change=on_change /> }
            }}
        </form>
    }
}

async fn read_file(file: File) -> Result<FileUpload, wasm_bindgen::JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = file.type_();
    Ok(FileUpload {
        file_name: file.name(),
        content_type: (!content_type.is_empty()).then_some(content_type),
        bytes,
    })
}
