//! Bookshelf Common Library
//!
//! 検索コントローラ・コレクションストア・フロントエンドで共有される型と純粋関数

pub mod catalog;
pub mod error;
pub mod state;
pub mod types;

pub use catalog::{parse_search_response, search_params, DEFAULT_PAGE_SIZE, FIRST_PAGE};
pub use error::{Error, Result};
pub use state::{is_blank, QueryState, QueryStatus};
pub use types::{CollectionItem, CoverSize, SearchResult};
