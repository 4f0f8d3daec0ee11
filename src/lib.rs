//! bookshelf
//!
//! カタログ検索（デバウンス付き）と本棚の永続化

pub mod catalog;
pub mod cli;
pub mod collection;
pub mod config;
pub mod console;
pub mod error;
pub mod query;

pub use catalog::{OpenLibraryClient, SearchClient};
pub use collection::{CollectionStore, JsonFileStorage, MemoryStorage, Notifier};
pub use query::QueryController;
