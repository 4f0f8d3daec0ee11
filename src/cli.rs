use crate::config::Config;
use bookshelf_common::CoverSize;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "書籍検索・本棚保存ツール（Open Library）", long_about = None)]
pub struct Cli {
    /// 省略時は interactive
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 本棚ファイル（設定より優先）
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// カタログのベースURL（設定より優先）
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    /// 表紙URLのサイズ (s/m/l)
    #[arg(long, default_value = "m", global = true)]
    pub cover_size: CoverSize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力しながら検索（1行ごとにクエリを更新）
    Interactive,

    /// 1回だけ検索して結果を表示
    Search {
        /// 検索語
        #[arg(required = true)]
        query: Vec<String>,

        /// 結果のN番目を本棚に追加
        #[arg(short, long)]
        save: Option<usize>,
    },

    /// 本棚の一覧を表示
    Shelf,

    /// 設定を表示/編集
    Config {
        /// カタログのベースURLを設定
        #[arg(long)]
        set_catalog_url: Option<String>,

        /// デバウンス時間（ミリ秒）を設定
        #[arg(long)]
        set_debounce_ms: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Cli {
    /// コマンドライン指定で設定を上書き
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.storage {
            config.storage_path = Some(path.clone());
        }
        if let Some(url) = &self.catalog_url {
            config.catalog_url = url.clone();
        }
    }

    /// tracing のデフォルトフィルタ
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "bookshelf=debug,info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["bookshelf"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.cover_size, CoverSize::Medium);
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::parse_from(["bookshelf", "search", "the", "hobbit", "--save", "2"]);
        match cli.command {
            Some(Commands::Search { query, save }) => {
                assert_eq!(query.join(" "), "the hobbit");
                assert_eq!(save, Some(2));
            }
            _ => panic!("search でパースされるべき"),
        }
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "bookshelf",
            "shelf",
            "--storage",
            "/tmp/shelf.json",
            "--catalog-url",
            "http://127.0.0.1:9000",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.storage_path, Some(PathBuf::from("/tmp/shelf.json")));
        assert_eq!(config.catalog_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_cover_size_arg() {
        let cli = Cli::parse_from(["bookshelf", "--cover-size", "L", "shelf"]);
        assert_eq!(cli.cover_size, CoverSize::Large);
    }
}
