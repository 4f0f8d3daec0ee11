//! 書籍データの型定義
//!
//! - SearchResult: カタログ検索の1件（クエリごとに生成、永続化しない）
//! - CollectionItem: 本棚に保存された1件（SearchResultと同一構造）
//!
//! JSONのフィールド名はカタログ（Open Library）のものをそのまま使う。
//! 本棚ファイルも同じ形式で保存される。

use serde::{Deserialize, Deserializer, Serialize};

/// 表紙画像のベースURL
pub const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// 著者が空のときの表示
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// カタログ検索結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// カタログキー（例: "/works/OL27448W"）
    #[serde(rename = "key", default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// 著者名（欠落・null は空配列）
    #[serde(
        rename = "author_name",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub authors: Vec<String>,

    /// 表紙ID（なければプレースホルダ画像）
    #[serde(rename = "cover_i", default, skip_serializing_if = "Option::is_none")]
    pub cover_image_id: Option<i64>,
}

/// 本棚アイテム
pub type CollectionItem = SearchResult;

/// 表紙画像サイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CoverSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

impl std::str::FromStr for CoverSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" | "small" => Ok(CoverSize::Small),
            "m" | "medium" => Ok(CoverSize::Medium),
            "l" | "large" => Ok(CoverSize::Large),
            _ => Err(format!("Unknown cover size: {}. Use s, m, or l", s)),
        }
    }
}

impl SearchResult {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cover(mut self, cover_image_id: i64) -> Self {
        self.cover_image_id = Some(cover_image_id);
        self
    }

    /// 表紙画像URL（表紙IDがなければNone）
    pub fn cover_url(&self, size: CoverSize) -> Option<String> {
        self.cover_image_id
            .map(|id| format!("{}/{}-{}.jpg", COVERS_BASE_URL, id, size.as_str()))
    }

    /// 著者の表示文字列（", " 区切り、空なら "Unknown"）
    pub fn authors_display(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.authors.join(", ")
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_deserialize_catalog_doc() {
        let json = r#"{
            "key": "/works/OL27482W",
            "title": "The Hobbit",
            "author_name": ["J.R.R. Tolkien"],
            "cover_i": 14627509,
            "first_publish_year": 1937
        }"#;

        let result: SearchResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.id, "/works/OL27482W");
        assert_eq!(result.title, "The Hobbit");
        assert_eq!(result.authors, vec!["J.R.R. Tolkien".to_string()]);
        assert_eq!(result.cover_image_id, Some(14627509));
    }

    #[test]
    fn test_search_result_missing_fields() {
        // key/title/author_name/cover_i がすべて欠落しても受け付ける
        let result: SearchResult = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert_eq!(result.id, "");
        assert_eq!(result.title, "");
        assert!(result.authors.is_empty());
        assert_eq!(result.cover_image_id, None);
    }

    #[test]
    fn test_search_result_null_authors() {
        let json = r#"{"key": "/works/X", "title": "T", "author_name": null}"#;
        let result: SearchResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(result.authors.is_empty());
    }

    #[test]
    fn test_search_result_serialize_uses_catalog_names() {
        let result = SearchResult::new("/works/OL1W", "Dune")
            .with_authors(["Frank Herbert"])
            .with_cover(42);

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"key\":\"/works/OL1W\""));
        assert!(json.contains("\"author_name\":[\"Frank Herbert\"]"));
        assert!(json.contains("\"cover_i\":42"));
    }

    #[test]
    fn test_search_result_serialize_without_cover() {
        let result = SearchResult::new("/works/OL2W", "No Cover");
        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(!json.contains("cover_i"));
        assert!(json.contains("\"author_name\":[]"));
    }

    #[test]
    fn test_cover_url() {
        let result = SearchResult::new("/works/OL1W", "Dune").with_cover(8231856);
        assert_eq!(
            result.cover_url(CoverSize::Medium).as_deref(),
            Some("https://covers.openlibrary.org/b/id/8231856-M.jpg")
        );
        assert_eq!(
            result.cover_url(CoverSize::Large).as_deref(),
            Some("https://covers.openlibrary.org/b/id/8231856-L.jpg")
        );
        assert_eq!(SearchResult::new("/works/OL2W", "x").cover_url(CoverSize::Small), None);
    }

    #[test]
    fn test_authors_display() {
        let none = SearchResult::new("/works/A", "A");
        assert_eq!(none.authors_display(), "Unknown");

        let many = SearchResult::new("/works/B", "B").with_authors(["Terry Pratchett", "Neil Gaiman"]);
        assert_eq!(many.authors_display(), "Terry Pratchett, Neil Gaiman");
    }
}
