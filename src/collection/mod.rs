//! 本棚（保存済み書籍コレクション）
//!
//! 起動時に永続化先から全件読み込み、以降はメモリ上に追記して
//! 追記のたびに全件を書き戻す。重複排除・削除はしない。

mod notifier;
mod storage;

pub use notifier::{added_message, Notifier, TracingNotifier};
pub use storage::{CollectionStorage, JsonFileStorage, MemoryStorage};

use crate::error::Result;
use bookshelf_common::{CollectionItem, SearchResult};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CollectionStore {
    storage: Arc<dyn CollectionStorage>,
    notifier: Arc<dyn Notifier>,
    items: Vec<CollectionItem>,
}

impl CollectionStore {
    /// 永続化先から読み込んで開く
    pub fn open(storage: Arc<dyn CollectionStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let mut store = Self {
            storage,
            notifier,
            items: Vec::new(),
        };
        store.items = store.load();
        store
    }

    /// 永続化されているコレクション全体を読む
    ///
    /// 未保存・読み込み失敗・JSON不正のいずれも空として扱う。
    pub fn load(&self) -> Vec<CollectionItem> {
        let contents = match self.storage.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("本棚の読み込みに失敗、空で開始します: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CollectionItem>>(&contents) {
            Ok(items) => {
                debug!("本棚を読み込み: {}件", items.len());
                items
            }
            Err(e) => {
                warn!("本棚データが不正、空で開始します: {}", e);
                Vec::new()
            }
        }
    }

    /// 末尾に追加して全件を書き戻し、通知する
    ///
    /// 書き込みに失敗してもメモリ上の追加は取り消さず、通知も送る。
    /// 失敗は戻り値で返す。
    pub fn add(&mut self, item: SearchResult) -> Result<()> {
        let title = item.title.clone();
        self.items.push(item);

        let saved = self.persist();
        if let Err(e) = &saved {
            warn!("本棚の保存に失敗: {}", e);
        }

        self.notifier.notify(&added_message(&title));
        saved
    }

    pub fn items(&self) -> &[CollectionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let contents = serde_json::to_string(&self.items)?;
        self.storage.write(&contents)
    }
}
