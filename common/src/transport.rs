//! リクエスト生成と通信の境界
//!
//! コア自身は通信しない。`ToolBoard::activate` が `ToolRequest` を返し、
//! アダプタ側の `ToolTransport` 実装が送信して結果を `ToolBoard::complete` に戻す

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

use crate::panel::PanelId;

/// クエリ文字列でエスケープする文字（unreserved以外すべて）
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// アップロードのフォームフィールド名
pub const UPLOAD_FIELD: &str = "exifFile";

/// 発行済みリクエストの識別子
///
/// パネルごとに単調増加。完了時に最新かどうかの判定に使う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub panel: PanelId,
    pub seq: u64,
}

/// パネルへの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    Text(String),
    File(FileUpload),
    None,
}

impl ToolInput {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ToolInput::Text(_) => "text",
            ToolInput::File(_) => "file",
            ToolInput::None => "empty",
        }
    }
}

/// アップロードするファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// HTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// リクエスト本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// multipart/form-data（1ファイル）
    Multipart { field: &'static str, file: FileUpload },
}

/// 送信待ちのリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    pub ticket: Ticket,
    pub method: Method,
    /// 相対パス（クエリ文字列込み）
    pub path: String,
    pub body: RequestBody,
}

impl ToolRequest {
    pub(crate) fn build(ticket: Ticket, endpoint: &str, input: ToolInput) -> Self {
        match input {
            ToolInput::Text(text) => Self {
                ticket,
                method: Method::Get,
                path: format!("{}?input={}", endpoint, encode_query_value(&text)),
                body: RequestBody::Empty,
            },
            ToolInput::File(file) => Self {
                ticket,
                method: Method::Post,
                path: endpoint.to_string(),
                body: RequestBody::Multipart {
                    field: UPLOAD_FIELD,
                    file,
                },
            },
            ToolInput::None => Self {
                ticket,
                method: Method::Get,
                path: endpoint.to_string(),
                body: RequestBody::Empty,
            },
        }
    }

    /// ベースURLと結合
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// クエリ値のエスケープ
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// 通信レベルの失敗（業務上の「結果なし」とは別物）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// HTTPステータスの判定
///
/// 入力不正時のサーバーは400とともに `{Success:false}` を返すので、本文があれば業務結果として扱う。
/// 5xx と本文のない4xxは通信失敗
pub fn check_status(status: u16, body: &str) -> Result<(), TransportError> {
    let client_error = (400..500).contains(&status);
    if status >= 500 || (client_error && body.trim().is_empty()) {
        return Err(TransportError::new(format!(
            "Request failed with status code {}",
            status
        )));
    }
    Ok(())
}

/// 通信アダプタ
///
/// WASMでは `Send` にならないため、`Send` 境界は付けない
#[allow(async_fn_in_trait)]
pub trait ToolTransport {
    /// 成功時はレスポンス本文を返す
    async fn send(&self, request: &ToolRequest) -> Result<String, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket {
            panel: PanelId::Anagram,
            seq: 1,
        }
    }

    #[test]
    fn test_text_input_is_percent_encoded() {
        let request = ToolRequest::build(ticket(), "/anagram", ToolInput::Text("a b&c=d".into()));
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/anagram?input=a%20b%26c%3Dd");
    }

    #[test]
    fn test_empty_text_sent_as_is() {
        let request = ToolRequest::build(ticket(), "/morse", ToolInput::Text(String::new()));
        assert_eq!(request.path, "/morse?input=");
    }

    #[test]
    fn test_match_pattern_characters() {
        let request = ToolRequest::build(ticket(), "/match", ToolInput::Text("c?t*".into()));
        assert_eq!(request.path, "/match?input=c%3Ft%2A");
    }

    #[test]
    fn test_file_input_is_multipart_post() {
        let file = FileUpload {
            file_name: "photo.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![0xff, 0xd8],
        };
        let request = ToolRequest::build(ticket(), "/exifUpload", ToolInput::File(file.clone()));
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/exifUpload");
        assert_eq!(
            request.body,
            RequestBody::Multipart {
                field: UPLOAD_FIELD,
                file
            }
        );
    }

    #[test]
    fn test_url_join() {
        let request = ToolRequest::build(ticket(), "/ideas", ToolInput::None);
        assert_eq!(request.url("http://localhost:8080/"), "http://localhost:8080/ideas");
        assert_eq!(request.url(""), "/ideas");
    }

    #[test]
    fn test_status_policy() {
        assert!(check_status(200, "{}").is_ok());
        assert!(check_status(400, r#"{"Success":false,"Result":null}"#).is_ok());
        assert_eq!(
            check_status(404, "").unwrap_err().message,
            "Request failed with status code 404"
        );
        assert!(check_status(502, "Bad Gateway").is_err());
    }

    #[test]
    fn test_transport_error_display() {
        assert_eq!(TransportError::new("Network Error").to_string(), "Network Error");
    }
}
