//! 本棚の永続化先
//!
//! 名前付きスロット1つに、コレクション全体のJSON文字列を丸ごと保存する。

use crate::error::{BookshelfError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub trait CollectionStorage: Send + Sync {
    /// スロットの内容（未保存なら None）
    fn read(&self) -> Result<Option<String>>;

    /// スロットを丸ごと上書き
    fn write(&self, contents: &str) -> Result<()>;
}

/// JSONファイル1つに保存
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CollectionStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    /// 一時ファイルに書いてから rename で置き換える
    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            BookshelfError::Storage(format!("{}: {}", self.path.display(), e))
        })
    }
}

/// プロセス内メモリに保存（クローンは同じスロットを共有）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存データ入りで作る
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl CollectionStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| BookshelfError::Storage("memory slot poisoned".into()))?;
        Ok(slot.clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| BookshelfError::Storage("memory slot poisoned".into()))?;
        *slot = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_missing_is_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = JsonFileStorage::new(dir.path().join("bookshelf.json"));
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_storage_overwrites_whole_slot() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = JsonFileStorage::new(dir.path().join("data").join("bookshelf.json"));

        storage.write("[1,2,3]").expect("書き込み失敗");
        storage.write("[1]").expect("書き込み失敗");

        assert_eq!(storage.read().unwrap().as_deref(), Some("[1]"));
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn test_memory_storage_clones_share_slot() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.write("[]").unwrap();
        assert_eq!(other.read().unwrap().as_deref(), Some("[]"));
        assert_eq!(other.contents().as_deref(), Some("[]"));
    }
}
