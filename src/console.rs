//! コンソール用フロントエンド
//!
//! QueryController の状態を描画し、入力を set_query / trigger_search /
//! CollectionStore::add に振り分けるだけの表示層。

use crate::catalog::SearchClient;
use crate::collection::{CollectionStore, Notifier};
use crate::error::Result;
use crate::query::QueryController;
use bookshelf_common::{CoverSize, QueryState, QueryStatus, SearchResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::warn;

pub const NO_RESULTS_MESSAGE: &str =
    "No books match your search criteria. Please try a different search term.";
pub const PROMPT_MESSAGE: &str = "Search Your Favorite Books";

/// 対話モードの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// 通常の行はクエリとして扱う
    Query(String),
    Search,
    Add(Option<usize>),
    Shelf,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Query(line.trim_end_matches(&['\r', '\n'][..]).to_string());
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or("") {
        "search" | "s" => Input::Search,
        "add" | "a" => match parts.next() {
            None => Input::Add(None),
            Some(n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Input::Add(Some(n)),
                _ => Input::Unknown(trimmed.to_string()),
            },
        },
        "shelf" => Input::Shelf,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

/// 通知を標準出力に表示
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("✔ {}", message);
    }
}

pub fn format_book(index: usize, book: &SearchResult, cover_size: CoverSize) -> String {
    let cover = book
        .cover_url(cover_size)
        .unwrap_or_else(|| "(表紙なし)".to_string());
    format!(
        "{:>2}. {}\n    Author: {}\n    {}",
        index,
        book.title,
        book.authors_display(),
        cover
    )
}

pub fn print_results(results: &[SearchResult], cover_size: CoverSize) {
    for (i, book) in results.iter().enumerate() {
        println!("{}", format_book(i + 1, book, cover_size));
    }
}

pub fn print_shelf(store: &CollectionStore, cover_size: CoverSize) {
    if store.is_empty() {
        println!("本棚は空です");
        return;
    }
    println!("📚 本棚 ({}冊)", store.len());
    print_results(store.items(), cover_size);
}

fn print_help() {
    println!("文字を入力すると検索します（入力が止まってから検索）");
    println!("  /search      今の入力ですぐ検索");
    println!("  /add [N]     N番目の結果を本棚に追加（省略時は選択）");
    println!("  /shelf       本棚を表示");
    println!("  /quit        終了");
}

/// 状態が変わるたびに描画（ローディング中はスピナー）
async fn render_loop(mut rx: watch::Receiver<QueryState>, cover_size: CoverSize) {
    let mut spinner: Option<ProgressBar> = None;
    let mut last: Option<(QueryStatus, Vec<SearchResult>)> = None;

    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        let status = state.status();

        if status == QueryStatus::Loading {
            if spinner.is_none() {
                spinner = Some(new_spinner());
            }
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }

        let view = (status, state.results.clone());
        if last.as_ref() == Some(&view) {
            continue;
        }
        last = Some(view);

        match status {
            QueryStatus::Loading => {}
            QueryStatus::Results => print_results(&state.results, cover_size),
            QueryStatus::NoResults | QueryStatus::Failed => println!("{}", NO_RESULTS_MESSAGE),
            QueryStatus::Idle => println!("{}", PROMPT_MESSAGE),
        }
    }

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
}

fn new_spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message("Loading...");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// N番目（1始まり）の結果を追加
fn add_result(store: &mut CollectionStore, state: &QueryState, n: usize) {
    match n.checked_sub(1).and_then(|i| state.results.get(i)) {
        Some(book) => {
            if let Err(e) = store.add(book.clone()) {
                warn!("本棚の保存に失敗: {}", e);
            }
        }
        None => println!("{}番目の結果はありません", n),
    }
}

fn select_result(state: &QueryState) -> Option<usize> {
    if state.results.is_empty() {
        println!("追加できる結果がありません");
        return None;
    }
    let labels: Vec<String> = state
        .results
        .iter()
        .map(|b| format!("{} / {}", b.title, b.authors_display()))
        .collect();
    dialoguer::Select::new()
        .with_prompt("本棚に追加する本")
        .items(&labels)
        .default(0)
        .interact_opt()
        .ok()
        .flatten()
        .map(|i| i + 1)
}

/// 対話モード
pub async fn run_interactive(
    client: Arc<dyn SearchClient>,
    debounce: Duration,
    store: &mut CollectionStore,
    cover_size: CoverSize,
) -> Result<()> {
    let mut controller = QueryController::new(client, debounce);
    let renderer = tokio::spawn(render_loop(controller.subscribe(), cover_size));

    println!("🔎 bookshelf - 書籍検索 (/help でヘルプ)\n");
    println!("{}", PROMPT_MESSAGE);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Query(text) => controller.set_query(&text),
            Input::Search => {
                let text = controller.state().query_text;
                controller.trigger_search(&text);
            }
            Input::Add(Some(n)) => add_result(store, &controller.state(), n),
            Input::Add(None) => {
                let state = controller.state();
                if let Some(n) = select_result(&state) {
                    add_result(store, &state, n);
                }
            }
            Input::Shelf => print_shelf(store, cover_size),
            Input::Help => print_help(),
            Input::Quit => break,
            Input::Unknown(cmd) => println!("不明なコマンド: {} (/help)", cmd),
        }
    }

    controller.shutdown();
    renderer.abort();
    Ok(())
}
