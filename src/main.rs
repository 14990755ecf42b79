mod discogs;
mod error;
mod handlers;
mod lookup;
mod normalize;
mod store;
mod styles;
mod types;
mod youtube;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::discogs::DiscogsClient;
use crate::handlers::AppState;
use crate::lookup::ReleaseLookup;
use crate::store::StyleCache;

#[derive(Parser)]
#[command(
    name = "cratescope",
    about = "Browse the most-collected Discogs releases by style"
)]
struct Args {
    /// Address to serve the API on
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
    /// Style cache database path (defaults to CRATESCOPE_STORE_PATH, then
    /// the platform data directory)
    #[arg(long)]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let store_path = args
        .store
        .or_else(|| std::env::var_os("CRATESCOPE_STORE_PATH").map(PathBuf::from))
        .unwrap_or_else(store::default_path);
    let cache = StyleCache::open(&store_path.to_string_lossy())?;
    tracing::info!("style cache at {}", store_path.display());

    let token = discogs::token_from_env();
    if token.is_none() {
        tracing::warn!(
            "no Discogs token configured (DISCOGS_TOKEN or DISCOGS_API_TOKEN); release lookups will fail"
        );
    }

    let client = DiscogsClient::new(reqwest::Client::new());
    let state = Arc::new(AppState {
        lookup: ReleaseLookup::new(token.clone(), client.clone(), cache),
        discogs: client,
        token,
    });

    tracing::info!("listening on {}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, handlers::router(state)).await?;
    Ok(())
}
