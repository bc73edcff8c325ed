use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use deezer_source::config::{self, AdapterOptions};
use deezer_source::{Deezer, DeezerApi, Manager, SearchQuery};

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Runs one search through a manager with the Deezer source loaded and prints the result.
#[derive(Parser)]
#[command(name = "deezer-search", version)]
struct Cli {
    /// Search text, or a Deezer track/album/playlist URL
    query: String,

    /// Source tag attached to the query, e.g. "dz"
    #[arg(long)]
    source: Option<String>,

    /// Keep only the first N album tracks (0 keeps all)
    #[arg(long)]
    album_limit: Option<usize>,

    /// Keep only the first N playlist tracks (0 keeps all)
    #[arg(long)]
    playlist_limit: Option<usize>,

    /// Resolve every track through the fallback search
    #[arg(long)]
    convert_unresolved: bool,

    /// Deezer API base URL, overrides DEEZER_API_URL
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deezer_source=info,warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    dotenv().ok();

    let cli = Cli::parse();

    // Flags win over DEEZER_* variables.
    let mut options = AdapterOptions::from_env()?;
    if let Some(limit) = cli.album_limit {
        options.album_limit = limit;
    }
    if let Some(limit) = cli.playlist_limit {
        options.playlist_limit = limit;
    }
    if cli.convert_unresolved {
        options.convert_unresolved = true;
    }

    let api = DeezerApi::new(config::api_base_url(cli.api_url)?);

    let mut manager = Manager::default();
    manager.use_plugin(Deezer::with_api(options, api));

    let query = match cli.source {
        Some(source) => SearchQuery::tagged(cli.query, source),
        None => SearchQuery::new(cli.query),
    };

    let result = manager.search(query, None).await;
    info!(
        "Search finished: {:?} with {} tracks",
        result.load_type,
        result.tracks.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
