//! テスト用の偽カタログサーバー（axum）
//!
//! q の値で応答を切り替える:
//! - "tolkien": 3件（1件は表紙なし）
//! - "zzzznomatch": 0件
//! - "hobbit": 503
//! - "broken": JSONでない本文
//! - その他: 1件（タイトル = q）

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub type Requests = Arc<Mutex<Vec<HashMap<String, String>>>>;

pub struct FakeCatalog {
    pub addr: SocketAddr,
    pub requests: Requests,
}

impl FakeCatalog {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn queries(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|params| params.get("q").cloned().unwrap_or_default())
            .collect()
    }
}

pub const TOLKIEN_BODY: &str = r#"{
    "numFound": 3,
    "start": 0,
    "docs": [
        {"key": "/works/OL27482W", "title": "The Hobbit", "author_name": ["J.R.R. Tolkien"], "cover_i": 14627509},
        {"key": "/works/OL27448W", "title": "The Lord of the Rings", "author_name": ["J.R.R. Tolkien"], "cover_i": 14625765},
        {"key": "/works/OL27513W", "title": "The Silmarillion", "author_name": ["J.R.R. Tolkien", "Christopher Tolkien"]}
    ]
}"#;

async fn search(
    State(requests): State<Requests>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let q = params.get("q").cloned().unwrap_or_default();
    requests.lock().unwrap().push(params);

    match q.as_str() {
        "tolkien" => (StatusCode::OK, TOLKIEN_BODY.to_string()),
        "zzzznomatch" => (StatusCode::OK, r#"{"numFound": 0, "docs": []}"#.to_string()),
        "hobbit" => (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable".to_string()),
        "broken" => (StatusCode::OK, "<html>oops</html>".to_string()),
        other => (
            StatusCode::OK,
            serde_json::json!({
                "docs": [{"key": format!("/works/{}", other), "title": other}]
            })
            .to_string(),
        ),
    }
}

pub async fn spawn_fake_catalog() -> FakeCatalog {
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/search.json", get(search))
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeCatalog { addr, requests }
}

/// 接続を拒否されるURL（一度bindして閉じたポート）
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
