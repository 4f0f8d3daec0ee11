//! 検索クエリのライフサイクル管理
//!
//! - set_query: 入力のたびに呼ぶ。静止期間（既定500ms）後に1回だけ検索
//! - trigger_search: タイマーを飛ばして即検索（検索ボタン相当）
//!
//! 状態は watch チャネルで公開する。set_query / trigger_search のたびに
//! 連番を進め、最新の連番以外のレスポンスは捨てる（遅れて届いた古い
//! レスポンスで上書きしない）。通信中のリクエスト自体は中断しない。
//!
//! いずれのメソッドも Tokio ランタイム内で呼ぶこと。

use crate::catalog::SearchClient;
use crate::error::Result;
use bookshelf_common::{is_blank, QueryState, SearchResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// 既定の静止期間
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct QueryController {
    shared: Arc<Shared>,
    debounce: Duration,
    /// 待機中のデバウンスタイマー
    timer: Option<JoinHandle<()>>,
}

struct Shared {
    client: Arc<dyn SearchClient>,
    state: watch::Sender<QueryState>,
    /// 最後に発行した連番
    seq: AtomicU64,
}

impl QueryController {
    pub fn new(client: Arc<dyn SearchClient>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            shared: Arc::new(Shared {
                client,
                state,
                seq: AtomicU64::new(0),
            }),
            debounce,
            timer: None,
        }
    }

    /// 入力テキストを更新し、タイマーを再スタート
    ///
    /// 空白のみなら結果を即座に消去し、リクエストは発行しない。
    pub fn set_query(&mut self, text: &str) {
        let seq = self.supersede();
        if self.clear_if_blank(text) {
            return;
        }
        self.shared.state.send_modify(|s| s.set_query_text(text));

        let shared = Arc::clone(&self.shared);
        let text = text.to_string();
        let deadline = Instant::now() + self.debounce;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            Shared::issue(shared, seq, text);
        }));
    }

    /// タイマーを待たずに即検索
    pub fn trigger_search(&mut self, text: &str) {
        let seq = self.supersede();
        if self.clear_if_blank(text) {
            return;
        }
        self.shared.state.send_modify(|s| s.set_query_text(text));
        Shared::issue(Arc::clone(&self.shared), seq, text.to_string());
    }

    /// 現在の状態のスナップショット
    pub fn state(&self) -> QueryState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.shared.state.subscribe()
    }

    /// デバウンスタイマーが待機中か
    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// タイマーを止め、通信中のレスポンスを無効化して状態を初期化
    pub fn shutdown(&mut self) {
        self.supersede();
        self.shared.state.send_replace(QueryState::default());
    }

    /// 連番を進めて待機中のタイマーを破棄。新しい連番を返す
    fn supersede(&mut self) -> u64 {
        let seq = self.shared.seq.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        seq
    }

    fn clear_if_blank(&self, text: &str) -> bool {
        if !is_blank(text) {
            return false;
        }
        self.shared.state.send_modify(|s| {
            s.set_query_text(text);
            s.clear();
        });
        true
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        self.supersede();
    }
}

impl Shared {
    fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    /// loading を立ててリクエストを別タスクで発行
    fn issue(shared: Arc<Self>, seq: u64, text: String) {
        let started = shared.state.send_if_modified(|s| {
            if !shared.is_current(seq) {
                return false;
            }
            s.begin_search();
            true
        });
        if !started {
            return;
        }

        debug!("search #{} issued: {:?}", seq, text);
        tokio::spawn(async move {
            let outcome = shared.client.search(&text).await;
            shared.apply(seq, &text, outcome);
        });
    }

    /// 最新の連番のときだけ結果を反映
    fn apply(&self, seq: u64, text: &str, outcome: Result<Vec<SearchResult>>) {
        let applied = self.state.send_if_modified(|s| {
            if !self.is_current(seq) {
                return false;
            }
            match outcome {
                Ok(results) => {
                    debug!("search #{} returned {} results", seq, results.len());
                    s.complete(results);
                }
                Err(err) => {
                    warn!("Error fetching data from catalog for {:?}: {}", text, err);
                    s.fail(err.to_string());
                }
            }
            true
        });
        if !applied {
            debug!("search #{} discarded as stale: {:?}", seq, text);
        }
    }
}
