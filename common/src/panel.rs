//! パネル定義
//!
//! ビルド時に固定されたツールパネルの一覧と、各パネルの
//! エンドポイント・入力種別・結果形状・表示領域

use serde::{Deserialize, Serialize};
use std::fmt;

/// ツールパネルID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelId {
    Anagram,
    Match,
    Morse,
    T9,
    Analyse,
    ExifUpload,
    Ideas,
    FlagSearch,
}

impl PanelId {
    pub const ALL: [PanelId; 8] = [
        PanelId::Anagram,
        PanelId::Match,
        PanelId::Morse,
        PanelId::T9,
        PanelId::Analyse,
        PanelId::ExifUpload,
        PanelId::Ideas,
        PanelId::FlagSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::Anagram => "anagram",
            PanelId::Match => "match",
            PanelId::Morse => "morse",
            PanelId::T9 => "t9",
            PanelId::Analyse => "analyse",
            PanelId::ExifUpload => "exifUpload",
            PanelId::Ideas => "ideas",
            PanelId::FlagSearch => "flagSearch",
        }
    }

    /// パネルの静的な設定
    pub fn definition(&self) -> PanelDefinition {
        match self {
            PanelId::Anagram => PanelDefinition::remote("/anagram", InputKind::Text, ResultShape::GroupedList),
            PanelId::Match => PanelDefinition::remote("/match", InputKind::Text, ResultShape::GroupedList),
            PanelId::Morse => PanelDefinition::remote("/morse", InputKind::Text, ResultShape::SimpleList),
            PanelId::T9 => PanelDefinition::remote("/t9", InputKind::Text, ResultShape::SimpleList),
            PanelId::Analyse => PanelDefinition::remote("/analyse", InputKind::Text, ResultShape::SimpleList),
            PanelId::ExifUpload => PanelDefinition::remote("/exifUpload", InputKind::File, ResultShape::ImageMetadata),
            PanelId::Ideas => PanelDefinition {
                endpoint: Some("/ideas"),
                input: InputKind::None,
                shape: ResultShape::IdeaSet,
                region: Region::Ideas,
            },
            PanelId::FlagSearch => PanelDefinition {
                endpoint: None,
                input: InputKind::Text,
                shape: ResultShape::Flags,
                region: Region::Flags,
            },
        }
    }

    pub fn region(&self) -> Region {
        self.definition().region
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PanelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .iter()
            .copied()
            .find(|panel| panel.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown panel: {}", s))
    }
}

/// 結果を描画する領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    /// リモートツール共有の結果領域
    Tools,
    /// 国旗検索の結果領域
    Flags,
    /// アイデア一覧
    Ideas,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Tools, Region::Flags, Region::Ideas];

    /// この領域の描画時に一緒にクリアされる領域
    ///
    /// ToolsとFlagsは同じレイアウト上で排他
    pub fn exclusive_with(&self) -> &'static [Region] {
        match self {
            Region::Tools => &[Region::Flags],
            Region::Flags => &[Region::Tools],
            Region::Ideas => &[],
        }
    }
}

/// 入力の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    File,
    None,
}

/// 結果ペイロードの形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    SimpleList,
    GroupedList,
    ImageMetadata,
    IdeaSet,
    Flags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDefinition {
    /// `None` はローカルで完結するパネル（国旗検索）
    pub endpoint: Option<&'static str>,
    pub input: InputKind,
    pub shape: ResultShape,
    pub region: Region,
}

impl PanelDefinition {
    const fn remote(endpoint: &'static str, input: InputKind, shape: ResultShape) -> Self {
        Self {
            endpoint: Some(endpoint),
            input,
            shape,
            region: Region::Tools,
        }
    }
}
