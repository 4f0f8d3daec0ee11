use crate::error::{BookshelfError, Result};
use bookshelf_common::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "bookshelf";
const CONFIG_FILE_NAME: &str = "config.json";
pub const STORAGE_FILE_NAME: &str = "bookshelf.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_url: String,
    pub page_size: u32,
    pub debounce_ms: u64,
    /// 未設定ならタイムアウトなし
    pub request_timeout_secs: Option<u64>,
    /// 未設定ならデータディレクトリ配下の bookshelf.json
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: "https://openlibrary.org".into(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: 500,
            request_timeout_secs: None,
            storage_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
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
            .ok_or_else(|| BookshelfError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    /// 本棚ファイルのパス
    pub fn storage_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }

        let data = dirs::data_dir()
            .ok_or_else(|| BookshelfError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join(APP_DIR).join(STORAGE_FILE_NAME))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
