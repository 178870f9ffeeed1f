use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use toolsy::cli::{self, TerminalCheckout};
use toolsy::config::AppConfig;
use toolsy::db::SqliteStorage;
use toolsy::services::payment::razorpay::HttpScriptLoader;
use toolsy::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    tracing::debug!(api_url = %config.api_url, storage = %config.storage_path, "starting toolsy");

    let storage = SqliteStorage::open(&config.storage_path)?;
    let loader = HttpScriptLoader::new(
        config.checkout_script_url.clone(),
        Arc::new(TerminalCheckout),
    );
    let state = AppState::new(config, Arc::new(storage), Arc::new(loader));

    let args: Vec<String> = std::env::args().skip(1).collect();
    cli::run(state, &args).await
}
