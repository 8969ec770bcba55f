//! 検索クエリの正規化
//!
//! 入力テキスト → ハイフンを空白に置換 → 空白で分割 →
//! 小文字化して英数字以外を除去 → 空トークンを除外

use std::collections::HashSet;

/// 正規化済みトークン列
///
/// 等価性は列の内容比較（順序も含む）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    tokens: Vec<String>,
}

impl Query {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// 重複を畳んだトークン集合
    pub fn distinct(&self) -> HashSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }
}

/// 1トークンを正規化
///
/// 小文字化した上で ASCII 英数字のみ残す
pub fn normalize_token(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// テキストをトークン列に分解（語彙によるフィルタ前）
///
/// # Examples
/// ```
/// use puzzle_tools_common::normalize_terms;
///
/// assert_eq!(normalize_terms("Red-White  CROSS!"), vec!["red", "white", "cross"]);
/// ```
pub fn normalize_terms(text: &str) -> Vec<String> {
    text.replace('-', " ")
        .split_whitespace()
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}
