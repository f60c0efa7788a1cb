mod config;
mod feed;
mod library;
mod store;
mod sync;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use feed::{FeedClient, SONGS_DATASET};
use library::Library;
use store::{DatasetStore, SqliteStore};
use sync::{SyncOutcome, Synchronizer};

#[derive(Parser, Debug)]
#[command(name = "mezmur")]
#[command(about = "Offline-first song library for the gospel choir content feed")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/mezmur/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Sync the local cache with the remote feed
  Sync {
    /// Keep syncing on an interval (seconds) instead of one-shot
    #[arg(long)]
    every: Option<u64>,
  },
  /// List the cached song library
  Songs,
  /// Drop the cached song dataset
  Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "mezmur=info".into()))
    .init();

  let args = Args::parse();
  let config = Config::load(args.config.as_deref())?;
  let store = Arc::new(open_store(&config)?);

  match args.command {
    Command::Sync { every } => {
      let client = FeedClient::new(&config)?;
      let sync = Synchronizer::new(client, Arc::clone(&store));

      match every {
        Some(secs) => run_interval_sync(&sync, secs).await,
        None => {
          let outcome = sync.sync().await?;
          report_outcome(&outcome);
          Ok(())
        }
      }
    }
    Command::Songs => {
      let library = Library::new(store);
      print_library(&library);
      Ok(())
    }
    Command::Clear => {
      store.clear(SONGS_DATASET)?;
      println!("Cleared cached song library");
      Ok(())
    }
  }
}

fn open_store(config: &Config) -> Result<SqliteStore> {
  let store = match &config.cache.path {
    Some(path) => SqliteStore::open_at(path)?,
    None => SqliteStore::open()?,
  };
  Ok(store)
}

/// Sync forever on a fixed interval. Failures degrade to offline: log
/// and keep the previous cached copy until the feed is reachable again.
async fn run_interval_sync(
  sync: &Synchronizer<FeedClient, SqliteStore>,
  secs: u64,
) -> Result<()> {
  let mut interval = tokio::time::interval(Duration::from_secs(secs.max(1)));

  loop {
    interval.tick().await;
    match sync.sync().await {
      Ok(outcome) => report_outcome(&outcome),
      Err(e) => warn!("sync failed, serving cached library: {}", e),
    }
  }
}

fn report_outcome(outcome: &SyncOutcome) {
  match outcome {
    SyncOutcome::Updated { songs } => info!(songs, "library synced"),
    SyncOutcome::InFlight => info!("sync already in progress, skipped"),
  }
}

fn print_library(library: &Library<SqliteStore>) {
  let songs = library.songs();

  if songs.is_empty() {
    println!("Library is empty (not synced yet, or cleared)");
    return;
  }

  for song in &songs {
    let artist = song
      .artist
      .as_ref()
      .map(|a| a.name.as_str())
      .unwrap_or("unknown artist");
    match &song.genre {
      Some(genre) => println!("{}  ({}, {})", song.title, artist, genre),
      None => println!("{}  ({})", song.title, artist),
    }
  }

  println!();
  println!("{} songs", songs.len());
  if let Some(synced_at) = library.last_synced() {
    println!("Last synced {}", synced_at.format("%Y-%m-%d %H:%M UTC"));
  }
}
