//! StoryReader - Accessible Picture Book Reader
//!
//! Main entry point: opens a book and drives a reading session from the
//! terminal.

use anyhow::Context;
use std::path::PathBuf;
use storyreader::content::{ContentProvider, FileContentProvider};
use storyreader::session::SessionHandle;
use storyreader::storage::config::{self, AppConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so snapshots on stdout stay clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting StoryReader v{}", env!("CARGO_PKG_VERSION"));

    let mut args = pico_args::Arguments::from_env();
    let content_root: Option<PathBuf> = args.opt_value_from_str("--content")?;
    let media_root: Option<PathBuf> = args.opt_value_from_str("--media")?;
    let json = args.contains("--json");
    let book_id = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    let mut config = config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Using default configuration: {}", e);
        AppConfig {
            data_dir: config::get_data_dir(),
            ..Default::default()
        }
    });
    if media_root.is_some() {
        config.media.media_root = media_root;
    }

    let root = content_root.unwrap_or_else(|| config.content.resolved_root(&config.data_dir));
    let book_id = book_id.unwrap_or_else(|| config.content.default_book.clone());

    let provider = FileContentProvider::new(root);
    let book = provider.load(&book_id).await.with_context(|| {
        format!(
            "could not open '{}' from {}",
            book_id,
            provider.root().display()
        )
    })?;

    let handle = SessionHandle::launch(
        book,
        config.media.player_config(),
        config.media.skip_seconds,
    );
    let mut updates = handle.subscribe();

    if !json {
        cli::print_help();
    }
    cli::render(&updates.borrow_and_update(), json);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match cli::parse_command(&line, &handle.snapshot()) {
                    Ok(cli::Input::Command(command)) => handle.send(command)?,
                    Ok(cli::Input::Show) => cli::render(&handle.snapshot(), json),
                    Ok(cli::Input::Help) => cli::print_help(),
                    Ok(cli::Input::Quit) => break,
                    Err(e) => println!("{}", e),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                cli::render(&snapshot, json);
            }
        }
    }

    handle.shutdown().await?;
    tracing::info!("Goodbye");
    Ok(())
}
