use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use drawalyze_rs::api::{AppServer, AppState};
use drawalyze_rs::drawings::MemoryDrawingStore;
use drawalyze_rs::helpers::{build_vision_client, load_gemini_keys};
use drawalyze_rs::{AnalyzerConfig, ImageAnalyzer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("drawalyze=info,drawalyze_rs=info,tower_http=info")
        }))
        .init();

    let config = AnalyzerConfig::from_env().context("invalid configuration")?;
    let client = build_vision_client(&config, load_gemini_keys())
        .context("failed to set up the vision model client")?;
    let analyzer = ImageAnalyzer::new(client, &config.model, config.temperature);
    let state = AppState::new(analyzer, Arc::new(MemoryDrawingStore::new()));

    let addr = config.bind_addr()?;
    info!(env = %config.env, model = %config.model, "Server running on http://{}", addr);
    AppServer::new(addr, state, config.body_limit_bytes)
        .start()
        .await
        .context("server error")?;
    Ok(())
}
