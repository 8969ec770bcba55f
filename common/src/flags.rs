//! 国旗キーワード検索インデックス
//!
//! 起動時に一度だけ読み込み、以降は読み取り専用。
//! 検索は全トークンを含むエントリのみを返すAND検索（部分一致なし）

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::query::{normalize_terms, Query};

/// 国旗データの1エントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagEntry {
    pub country: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// 正規化済みキーワード（小文字英数字のみ）
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl FlagEntry {
    /// 国旗画像のパス
    pub fn image_path(&self) -> String {
        format!("/flags/{}.webp", self.image)
    }
}

/// キーワード検索インデックス
#[derive(Debug, Clone, Default)]
pub struct KeywordFilterIndex {
    entries: Vec<FlagEntry>,
    keyword_sets: Vec<HashSet<String>>,
    /// 初出順の語彙
    vocabulary: Vec<String>,
    known: HashSet<String>,
}

impl KeywordFilterIndex {
    /// データセットからインデックスを構築
    pub fn load(entries: Vec<FlagEntry>) -> Self {
        let mut vocabulary = Vec::new();
        let mut known = HashSet::new();
        let mut keyword_sets = Vec::with_capacity(entries.len());

        for entry in &entries {
            for keyword in &entry.keywords {
                if known.insert(keyword.clone()) {
                    vocabulary.push(keyword.clone());
                }
            }
            keyword_sets.push(entry.keywords.iter().cloned().collect());
        }

        Self {
            entries,
            keyword_sets,
            vocabulary,
            known,
        }
    }

    /// flags.json をパースして構築
    pub fn try_from_json(json: &str) -> Result<Self> {
        let entries: Vec<FlagEntry> = serde_json::from_str(json)
            .map_err(|e| Error::Dataset(format!("flags.json: {}", e)))?;
        Ok(Self::load(entries))
    }

    /// flags.json をパースして構築（失敗時は空のインデックス）
    ///
    /// データセットが取得できなくてもページは使える状態を保つ
    pub fn from_json_or_empty(json: &str) -> Self {
        match Self::try_from_json(json) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("flag dataset unavailable, search disabled: {}", e);
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[FlagEntry] {
        &self.entries
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 入力テキストをクエリに変換
    ///
    /// 語彙にないトークンは黙って捨てる
    pub fn normalize(&self, text: &str) -> Query {
        Query::new(
            normalize_terms(text)
                .into_iter()
                .filter(|token| self.known.contains(token))
                .collect(),
        )
    }

    /// クエリの全トークンを含むエントリを元の順序で返す
    ///
    /// 空クエリは何も返さない
    pub fn query(&self, query: &Query) -> Vec<&FlagEntry> {
        if query.is_empty() {
            return Vec::new();
        }

        let wanted = query.distinct();
        self.entries
            .iter()
            .zip(&self.keyword_sets)
            .filter(|(_, keywords)| wanted.iter().all(|token| keywords.contains(*token)))
            .map(|(entry, _)| entry)
            .collect()
    }

    /// テキストから直接検索
    pub fn search(&self, text: &str) -> Vec<&FlagEntry> {
        self.query(&self.normalize(text))
    }
}
