use crate::error::{Result, ToolError};
use puzzle_tools_common::BoardConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const BASE_URL_ENV: &str = "PUZZLE_TOOLS_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub board: BoardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 30,
            board: BoardConfig::default(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書き
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_override(std::env::var(BASE_URL_ENV).ok())?;
        Ok(config)
    }

    /// 環境変数のURLを反映（`set_base_url` と同じ検証を通す）
    pub fn apply_env_override(&mut self, url: Option<String>) -> Result<()> {
        match url {
            Some(url) if !url.trim().is_empty() => self.set_base_url(url),
            _ => Ok(()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ToolError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("puzzle-tools").join("config.json"))
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ToolError::Config(format!("URLが不正です: {}", url)));
        }
        self.base_url = trimmed.trim_end_matches('/').to_string();
        Ok(())
    }
}
