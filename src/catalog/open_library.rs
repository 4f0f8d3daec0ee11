//! Open Library search.json クライアント

use super::SearchClient;
use crate::config::Config;
use crate::error::{BookshelfError, Result};
use async_trait::async_trait;
use bookshelf_common::catalog::SEARCH_PATH;
use bookshelf_common::{parse_search_response, search_params, SearchResult};
use reqwest::Url;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("bookshelf/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: reqwest::Client,
    search_url: Url,
    page_size: u32,
}

impl OpenLibraryClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            search_url: search_url(&config.catalog_url)?,
            page_size: config.page_size,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

/// ベースURL + "search.json"（末尾スラッシュの有無は問わない）
fn search_url(base: &str) -> Result<Url> {
    let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))
        .map_err(|e| BookshelfError::Config(format!("カタログURLが不正です: {}: {}", base, e)))?;
    base.join(SEARCH_PATH)
        .map_err(|e| BookshelfError::Config(format!("検索URLの組み立てに失敗: {}", e)))
}

#[async_trait]
impl SearchClient for OpenLibraryClient {
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>> {
        debug!("catalog request: {} q={:?}", self.search_url, text);

        let response = self
            .http
            .get(self.search_url.clone())
            .query(&search_params(text, self.page_size))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("catalog error response ({}): {}", status, body);
            return Err(BookshelfError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let results = parse_search_response(&body)?;
        debug!("catalog returned {} docs for {:?}", results.len(), text);
        Ok(results)
    }
}
