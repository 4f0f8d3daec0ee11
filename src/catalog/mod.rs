//! カタログ検索
//!
//! SearchClient はクエリ1件を発行して SearchResult 配列に正規化するだけで、
//! 状態を持たない。リトライもしない。

mod open_library;

pub use open_library::OpenLibraryClient;

use crate::error::Result;
use async_trait::async_trait;
use bookshelf_common::SearchResult;

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// 1ページ目（最大 page_size 件）を取得
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>>;
}
