//! 抽象ビューモデル
//!
//! コアはDOMを直接触らず、ラベル・リンク・テキストの木を生成するだけ。
//! 具体的なUIへの変換はアダプタ（Web/端末）側の `Surface` が行う

use serde::Serialize;

/// 1領域分の描画内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub nodes: Vec<ViewNode>,
}

/// 最上位ノード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewNode {
    /// 読み込み中表示
    Loading { text: String },
    /// 単独のメッセージ（結果なし・エラーなど）
    Message { text: String, tone: Tone },
    /// 結果を閉じるコントロール（フォーム全体のリセット）
    Dismiss,
    /// 箇条書き
    List { items: Vec<ListItem> },
    /// 国旗検索の結果カード
    FlagCard { country: String, image_src: String },
}

/// メッセージの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Info,
    Error,
}

/// 箇条書きの項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListItem {
    Text { text: String },
    Link { label: String, href: String, title: String },
    /// 見出し付きの入れ子リスト
    Group { header: String, items: Vec<ListItem> },
}

impl ViewModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn loading(text: &str) -> Self {
        Self {
            nodes: vec![ViewNode::Loading { text: sanitize_text(text) }],
        }
    }

    pub fn message(text: impl AsRef<str>, tone: Tone) -> Self {
        Self {
            nodes: vec![ViewNode::Message {
                text: sanitize_text(text.as_ref()),
                tone,
            }],
        }
    }

    /// 閉じるボタン + リスト
    pub fn dismissable_list(items: Vec<ListItem>) -> Self {
        Self {
            nodes: vec![ViewNode::Dismiss, ViewNode::List { items }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_dismiss(&self) -> bool {
        self.nodes.iter().any(|node| matches!(node, ViewNode::Dismiss))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.nodes.as_slice(), [ViewNode::Loading { .. }])
    }

    /// 全テキストを深さ優先で列挙（テスト・端末出力用）
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                ViewNode::Loading { text } | ViewNode::Message { text, .. } => out.push(text.as_str()),
                ViewNode::Dismiss => {}
                ViewNode::List { items } => collect_item_texts(items, &mut out),
                ViewNode::FlagCard { country, .. } => out.push(country.as_str()),
            }
        }
        out
    }
}

fn collect_item_texts<'a>(items: &'a [ListItem], out: &mut Vec<&'a str>) {
    for item in items {
        match item {
            ListItem::Text { text } => out.push(text),
            ListItem::Link { label, .. } => out.push(label),
            ListItem::Group { header, items } => {
                out.push(header);
                collect_item_texts(items, out);
            }
        }
    }
}

impl ListItem {
    pub fn text(text: impl AsRef<str>) -> Self {
        ListItem::Text {
            text: sanitize_text(text.as_ref()),
        }
    }

    /// 外部リンク（http/httpsのみ許可、それ以外はテキスト化）
    pub fn link(label: &str, href: &str, title: &str) -> Self {
        match sanitize_href(href) {
            Some(href) => ListItem::Link {
                label: sanitize_text(label),
                href,
                title: sanitize_text(title),
            },
            None => ListItem::text(label),
        }
    }

    pub fn group(header: impl AsRef<str>, items: Vec<ListItem>) -> Self {
        ListItem::Group {
            header: sanitize_text(header.as_ref()),
            items,
        }
    }
}

/// 表示テキストの無害化
///
/// 改行とタブ以外の制御文字だけを取り除く。空白はそのまま残す。HTMLとしては解釈されない前提
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

/// リンク先の検証
pub fn sanitize_href(href: &str) -> Option<String> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    if (lower.starts_with("https://") || lower.starts_with("http://"))
        && !href.chars().any(|c| c.is_control() || c.is_whitespace())
    {
        Some(href.to_string())
    } else {
        None
    }
}
