//! カタログ（Open Library）レスポンスパーサー
//!
//! search.json のレスポンス本文から SearchResult 配列を取り出す。
//! 通信は行わない（HTTPクライアントは本体クレート側）。

use crate::error::{Error, Result};
use crate::types::SearchResult;
use serde::Deserialize;

/// 検索エンドポイントのパス
pub const SEARCH_PATH: &str = "search.json";

/// 1リクエストあたりの取得件数
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 常に1ページ目のみ取得
pub const FIRST_PAGE: u32 = 1;

/// search.json レスポンス（必要なフィールドのみ）
#[derive(Debug, Deserialize)]
struct SearchResponse {
    docs: Vec<SearchResult>,
}

/// 検索クエリパラメータを組み立てる
///
/// クエリ文字列はそのまま渡す（エンコードはHTTPクライアント側）。
pub fn search_params(text: &str, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("q", text.to_string()),
        ("limit", page_size.to_string()),
        ("page", FIRST_PAGE.to_string()),
    ]
}

/// レスポンス本文をパース
///
/// # Returns
/// * `Ok(Vec<SearchResult>)` - docs 配列（空配列もOK）
/// * `Err` - JSONでない、または docs 配列がない
///
/// # Examples
/// ```
/// use bookshelf_common::parse_search_response;
///
/// let body = r#"{"numFound": 1, "docs": [{"key": "/works/OL1W", "title": "Dune"}]}"#;
/// let results = parse_search_response(body).unwrap();
/// assert_eq!(results[0].title, "Dune");
/// ```
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("search.json パースエラー: {}", e)))?;
    Ok(response.docs)
}
