use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookshelfError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("カタログがエラーを返しました ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("カタログレスポンスのパースに失敗: {0}")]
    CatalogParse(String),

    #[error("本棚の保存に失敗: {0}")]
    Storage(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bookshelf_common::Error> for BookshelfError {
    fn from(err: bookshelf_common::Error) -> Self {
        match err {
            bookshelf_common::Error::Io(e) => BookshelfError::Io(e),
            bookshelf_common::Error::Json(e) => BookshelfError::JsonParse(e),
            bookshelf_common::Error::Parse(msg) => BookshelfError::CatalogParse(msg),
            bookshelf_common::Error::Config(msg) => BookshelfError::Config(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookshelfError>;
