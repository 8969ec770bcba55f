//! ボード設定

use serde::{Deserialize, Serialize};

use crate::panel::PanelId;

pub const DEFAULT_MAX_RESULTS: usize = 1000;
pub const DEFAULT_LOADING_TEXT: &str = "Loading response";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardConfig {
    /// 描画する結果件数の上限
    pub max_results: usize,
    /// EXIFの項目一覧の上限（`None` で上限なし）
    pub exif_max_results: Option<usize>,
    pub loading_text: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            exif_max_results: None,
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
        }
    }
}

impl BoardConfig {
    /// パネルごとの件数上限
    pub fn cap_for(&self, panel: PanelId) -> Option<usize> {
        match panel {
            PanelId::ExifUpload => self.exif_max_results,
            _ => Some(self.max_results),
        }
    }
}
