//! fetch APIによる通信アダプタ

use puzzle_tools_common::{
    check_status, FileUpload, KeywordFilterIndex, Method, RequestBody, ToolRequest, ToolTransport,
    TransportError,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

pub const FLAGS_DATASET_PATH: &str = "/flags.json";

/// 同一オリジンのサーバーへ送る
#[derive(Clone, Debug, Default)]
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn same_origin() -> Self {
        Self::default()
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// 国旗データセットを取得
    ///
    /// 失敗しても空のインデックスを返す（検索は常に0件になる）
    pub async fn fetch_flags(&self) -> KeywordFilterIndex {
        let url = self.url_for(FLAGS_DATASET_PATH);
        let init = RequestInit::new();
        init.set_method("GET");
        let body = async {
            let request = Request::new_with_str_and_init(&url, &init)?;
            let (status, body) = fetch_text(&request).await?;
            check_status(status, &body).map_err(|e| JsValue::from_str(&e.message))?;
            Ok::<_, JsValue>(body)
        };
        match body.await {
            Ok(json) => KeywordFilterIndex::from_json_or_empty(&json),
            Err(e) => {
                tracing::warn!("failed to fetch {}: {}", url, js_error(e));
                KeywordFilterIndex::default()
            }
        }
    }
}

impl ToolTransport for FetchTransport {
    async fn send(&self, request: &ToolRequest) -> Result<String, TransportError> {
        let init = RequestInit::new();
        init.set_method(method_name(request.method));
        init.set_mode(RequestMode::SameOrigin);
        if let RequestBody::Multipart { field, file } = &request.body {
            let form = upload_form(field, file).map_err(js_error)?;
            init.set_body(&JsValue::from(form));
        }

        let fetch_request =
            Request::new_with_str_and_init(&request.url(&self.base_url), &init).map_err(js_error)?;
        fetch_request
            .headers()
            .set("Accept", "application/json")
            .map_err(js_error)?;

        let (status, body) = fetch_text(&fetch_request).await.map_err(js_error)?;
        check_status(status, &body)?;
        Ok(body)
    }
}

pub fn method_name(method: Method) -> &'static str {
    match method {
        Method::Get => "GET",
        Method::Post => "POST",
    }
}

fn upload_form(field: &str, file: &FileUpload) -> Result<FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    if let Some(content_type) = &file.content_type {
        options.set_type(content_type);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let form = FormData::new()?;
    form.append_with_blob_and_filename(field, &blob, &file.file_name)?;
    Ok(form)
}

async fn fetch_text(request: &Request) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let value = JsFuture::from(window.fetch_with_request(request)).await?;
    let response: Response = value.dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    Ok((response.status(), text.as_string().unwrap_or_default()))
}

/// JS側の例外を通信エラーへ
pub fn js_error(value: JsValue) -> TransportError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Network Error".to_string());
    TransportError::new(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_tools_common::{PanelId, ToolBoard, ToolInput};
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_same_origin_urls_are_relative() {
        let transport = FetchTransport::same_origin();
        assert_eq!(transport.url_for(FLAGS_DATASET_PATH), "/flags.json");
    }

    #[wasm_bindgen_test]
    fn test_js_error_message() {
        let error = js_error(js_sys::Error::new("Failed to fetch").into());
        assert_eq!(error.message, "Failed to fetch");
        assert_eq!(js_error(JsValue::NULL).message, "Network Error");
    }

    #[wasm_bindgen_test]
    fn test_upload_form_has_file_field() {
        let file = FileUpload {
            file_name: "photo.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![0xff, 0xd8, 0xff],
        };
        let form = upload_form("exifFile", &file).unwrap();
        assert!(form.has("exifFile"));
    }

    #[wasm_bindgen_test]
    fn test_request_method_names() {
        let mut board = ToolBoard::new(NullSurface, Default::default());
        let get = board
            .activate(PanelId::T9, ToolInput::Text("43556".into()))
            .unwrap();
        assert_eq!(method_name(get.method), "GET");
        assert_eq!(get.url(""), "/t9?input=43556");
    }

    struct NullSurface;

    impl puzzle_tools_common::Surface for NullSurface {
        fn render(&mut self, _: puzzle_tools_common::Region, _: &puzzle_tools_common::ViewModel) {}
        fn clear_input(&mut self, _: PanelId) {}
    }
}
