use anyhow::{bail, Context, Result};
use bookshelf::catalog::{OpenLibraryClient, SearchClient};
use bookshelf::cli::{Cli, Commands};
use bookshelf::collection::{CollectionStore, JsonFileStorage};
use bookshelf::config::Config;
use bookshelf::console::{self, ConsoleNotifier, NO_RESULTS_MESSAGE};
use bookshelf::query::QueryController;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load().context("設定の読み込みに失敗")?;
    cli.apply_overrides(&mut config);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let client: Arc<dyn SearchClient> = Arc::new(OpenLibraryClient::new(&config)?);
            let mut store = open_store(&config)?;
            console::run_interactive(client, config.debounce(), &mut store, cli.cover_size).await?;
        }

        Commands::Search { query, save } => {
            let text = query.join(" ");
            println!("🔎 \"{}\" を検索中...", text);

            let client: Arc<dyn SearchClient> = Arc::new(OpenLibraryClient::new(&config)?);
            let mut controller = QueryController::new(client, config.debounce());
            let mut rx = controller.subscribe();
            controller.trigger_search(&text);
            let state = rx
                .wait_for(|s| !s.loading)
                .await
                .context("検索が中断されました")?
                .clone();

            if let Some(err) = &state.error {
                eprintln!("検索エラー: {}", err);
            }
            if state.results.is_empty() {
                println!("{}", NO_RESULTS_MESSAGE);
            } else {
                console::print_results(&state.results, cli.cover_size);
            }

            if let Some(n) = save {
                let Some(book) = n.checked_sub(1).and_then(|i| state.results.get(i)) else {
                    bail!("{}番目の結果はありません（{}件）", n, state.results.len());
                };
                let mut store = open_store(&config)?;
                store.add(book.clone()).context("本棚の保存に失敗")?;
            }
        }

        Commands::Shelf => {
            let store = open_store(&config)?;
            console::print_shelf(&store, cli.cover_size);
        }

        Commands::Config { set_catalog_url, set_debounce_ms, show } => {
            let mut config = Config::load()?;
            let mut changed = false;

            if let Some(url) = set_catalog_url {
                config.catalog_url = url;
                changed = true;
            }
            if let Some(ms) = set_debounce_ms {
                config.debounce_ms = ms;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  カタログURL: {}", config.catalog_url);
                println!("  取得件数: {}", config.page_size);
                println!("  デバウンス: {}ms", config.debounce_ms);
                match config.request_timeout_secs {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  本棚ファイル: {}", config.storage_path()?.display());
            }
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<CollectionStore> {
    let path = config.storage_path()?;
    Ok(CollectionStore::open(
        Arc::new(JsonFileStorage::new(path)),
        Arc::new(ConsoleNotifier),
    ))
}
