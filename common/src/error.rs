//! エラー型定義

use thiserror::Error;

use crate::panel::PanelId;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Panel {panel} does not accept {input} input")]
    InputMismatch { panel: PanelId, input: &'static str },

    #[error("Panel {0} is not backed by a remote endpoint")]
    NotRemote(PanelId),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
