//! ツール結果の型定義とレスポンスパーサー
//!
//! リモートツールのレスポンスは `{ Success: bool, Result: ... }` 形式。
//! `Success=false` は通信成功でも「結果なし」として扱う（バックエンドが判定者）

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::panel::ResultShape;

/// レスポンスの外枠
#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    #[serde(rename = "Success", default)]
    success: bool,
    #[serde(rename = "Result", default)]
    result: Value,
}

/// 結果の種別ごとのペイロード
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// モールス・T9・解析
    SimpleList(Vec<String>),
    /// 辞書名 → 単語リスト（アナグラム・マッチ）
    GroupedList(Vec<WordGroup>),
    /// EXIF解析結果（`None` はサーバーがnullを返した場合）
    ImageMetadata(Option<ImageMetadata>),
    /// アイデア一覧
    IdeaSet(Vec<Idea>),
}

/// 辞書ごとの単語グループ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGroup {
    pub dictionary: String,
    pub words: Vec<String>,
}

/// 解析済みレスポンス
#[derive(Debug, Clone, PartialEq)]
pub enum ToolReply {
    /// 業務上の「結果なし」（`Success=false`）
    NoResult,
    Data(ToolResult),
}

/// EXIFの詳細
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExifData {
    pub map_link: Option<String>,
    pub datetime: Option<String>,
    #[serde(alias = "comment")]
    pub comments: Option<String>,
    pub raw_values: Option<Map<String, Value>>,
}

impl ExifData {
    fn is_empty(&self) -> bool {
        self.map_link.is_none()
            && self.datetime.is_none()
            && self.comments.is_none()
            && self.raw_values.is_none()
    }
}

/// 画像メタデータ
///
/// サーバーは `exifData` の下にネストして返すが、フラットな形式も受け付ける
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(rename = "type", default)]
    pub image_type: String,
    #[serde(rename = "exifData", default, skip_serializing_if = "Option::is_none")]
    pub exif_data: Option<ExifData>,
    #[serde(flatten)]
    pub inline: ExifData,
}

impl ImageMetadata {
    /// 実際に使うEXIF（ネスト優先）
    pub fn exif(&self) -> &ExifData {
        match &self.exif_data {
            Some(nested) if !nested.is_empty() || self.inline.is_empty() => nested,
            _ => &self.inline,
        }
    }
}

/// アイデア
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Idea {
    pub category: String,
    pub text: String,
    #[serde(rename = "type")]
    pub idea_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl Idea {
    /// ウィジェット付きのアイデアか
    pub fn has_widget(&self) -> bool {
        self.idea_type == "html+js" && self.script.is_some()
    }
}

/// レスポンス本文を結果形状に従ってパース
pub fn parse_reply(shape: ResultShape, body: &str) -> Result<ToolReply> {
    if shape == ResultShape::IdeaSet {
        return parse_ideas(body).map(|ideas| match ideas {
            Some(ideas) => ToolReply::Data(ToolResult::IdeaSet(ideas)),
            None => ToolReply::NoResult,
        });
    }

    let envelope: Envelope = serde_json::from_str(body)?;
    if !envelope.success {
        return Ok(ToolReply::NoResult);
    }

    let result = match shape {
        ResultShape::SimpleList => ToolResult::SimpleList(parse_simple_list(envelope.result)?),
        ResultShape::GroupedList => ToolResult::GroupedList(parse_grouped_list(envelope.result)?),
        ResultShape::ImageMetadata => ToolResult::ImageMetadata(parse_image_metadata(envelope.result)?),
        ResultShape::IdeaSet | ResultShape::Flags => {
            return Err(Error::Parse(format!("{:?} is not an enveloped result", shape)));
        }
    };

    Ok(ToolReply::Data(result))
}

/// `/ideas` のレスポンス（外枠なしの配列）
///
/// `null` はアイデアなし（`None`）として返す
pub fn parse_ideas(body: &str) -> Result<Option<Vec<Idea>>> {
    let ideas: Option<Vec<Idea>> = serde_json::from_str(body)?;
    Ok(ideas)
}

fn parse_simple_list(value: Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.into_iter().map(value_to_text).collect()),
        other => Err(Error::Parse(format!("expected a list, got {}", other))),
    }
}

fn parse_grouped_list(value: Value) -> Result<Vec<WordGroup>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(groups) => groups
            .into_iter()
            .map(|(dictionary, words)| {
                Ok(WordGroup {
                    dictionary,
                    words: parse_simple_list(words)?,
                })
            })
            .collect(),
        other => Err(Error::Parse(format!("expected dictionary groups, got {}", other))),
    }
}

/// 画像メタデータはオブジェクトでもJSON文字列でも受け付ける
fn parse_image_metadata(value: Value) -> Result<Option<ImageMetadata>> {
    match value {
        Value::Null => Ok(None),
        Value::String(encoded) => {
            let inner: Option<ImageMetadata> = serde_json::from_str(&encoded)?;
            Ok(inner)
        }
        object @ Value::Object(_) => Ok(Some(serde_json::from_value(object)?)),
        other => Err(Error::Parse(format!("expected image metadata, got {}", other))),
    }
}

/// スカラー値を表示用文字列に変換
pub(crate) fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
