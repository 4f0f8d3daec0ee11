//! 検索状態の定義と遷移
//!
//! QueryState はコントローラが公開する観測可能な状態。
//! 遷移はすべてここで定義し、副作用（タイマー・通信）は持たない。
//!
//! 不変条件: `loading == false` かつ検索が完了していて
//! `query_text` が空白でないとき、`results.is_empty() == empty`。

use crate::types::SearchResult;

/// 空白のみの文字列は空クエリとして扱う
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// 検索状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub query_text: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    /// 空白でないクエリの検索が完了し、0件だったとき true（失敗時も true）
    pub empty: bool,
    /// 失敗時の診断メッセージ。0件ヒットでは None
    pub error: Option<String>,
}

/// 表示用の状態区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// 未検索（結果なし・ローディングなし）
    Idle,
    Loading,
    Results,
    NoResults,
    Failed,
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Idle => "idle",
            QueryStatus::Loading => "loading",
            QueryStatus::Results => "results",
            QueryStatus::NoResults => "no-results",
            QueryStatus::Failed => "failed",
        }
    }
}

impl QueryState {
    /// 入力テキストを記録（結果は次の遷移まで残す）
    pub fn set_query_text(&mut self, text: &str) {
        self.query_text = text.to_string();
    }

    /// 空クエリ: 結果・0件フラグ・エラーを消去し、ローディングも解除
    pub fn clear(&mut self) {
        self.results.clear();
        self.empty = false;
        self.loading = false;
        self.error = None;
    }

    /// リクエスト発行
    pub fn begin_search(&mut self) {
        self.loading = true;
    }

    /// 検索成功
    pub fn complete(&mut self, results: Vec<SearchResult>) {
        self.loading = false;
        self.empty = results.is_empty();
        self.results = results;
        self.error = None;
    }

    /// 検索失敗（0件と同じ見た目、error だけが異なる）
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.results.clear();
        self.empty = true;
        self.error = Some(message.into());
    }

    pub fn status(&self) -> QueryStatus {
        if self.loading {
            QueryStatus::Loading
        } else if self.error.is_some() {
            QueryStatus::Failed
        } else if self.empty {
            QueryStatus::NoResults
        } else if !self.results.is_empty() {
            QueryStatus::Results
        } else {
            QueryStatus::Idle
        }
    }
}
