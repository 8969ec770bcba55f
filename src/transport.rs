//! reqwestによる通信アダプタ

use std::time::Duration;

use puzzle_tools_common::{
    check_status, KeywordFilterIndex, Method, RequestBody, ToolRequest, ToolTransport, TransportError,
};
use reqwest::multipart::{Form, Part};

use crate::config::Config;
use crate::error::{Result, ToolError};

pub const FLAGS_DATASET_PATH: &str = "/flags.json";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, request: &ToolRequest) -> std::result::Result<reqwest::RequestBuilder, TransportError> {
        let url = request.url(&self.base_url);
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };

        match &request.body {
            RequestBody::Empty => Ok(builder),
            RequestBody::Multipart { field, file } => {
                let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                if let Some(content_type) = &file.content_type {
                    part = part
                        .mime_str(content_type)
                        .map_err(|e| TransportError::new(e.to_string()))?;
                }
                Ok(builder
                    .header(reqwest::header::ACCEPT, "application/json")
                    .multipart(Form::new().part(*field, part)))
            }
        }
    }

    /// 国旗データセットを取得
    ///
    /// 取得・解析に失敗しても空のインデックスを返す
    pub async fn fetch_flags(&self) -> KeywordFilterIndex {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), FLAGS_DATASET_PATH);
        let body = async {
            self.client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        };
        match body.await {
            Ok(json) => KeywordFilterIndex::from_json_or_empty(&json),
            Err(e) => {
                tracing::warn!("failed to fetch {}: {}", url, e);
                KeywordFilterIndex::default()
            }
        }
    }
}

impl ToolTransport for HttpTransport {
    async fn send(&self, request: &ToolRequest) -> std::result::Result<String, TransportError> {
        let builder = self.build(request)?;
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        check_status(status, &body)?;
        Ok(body)
    }
}

/// ローカルのflags.jsonを読み込む
pub fn load_flags_file(path: &std::path::Path) -> Result<KeywordFilterIndex> {
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.display().to_string()));
    }
    let json = std::fs::read_to_string(path)?;
    KeywordFilterIndex::try_from_json(&json).map_err(|e| ToolError::Dataset(e.to_string()))
}
