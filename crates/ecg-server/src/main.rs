//! ECG reconstruction HTTP service
//!
//! Accepts raw Lead I / Lead II signals, derives the remaining limb leads,
//! synthesizes V1-V6 when a generative model is loaded, and serves stored
//! record files.

mod routes;
mod state;

use anyhow::Context;
use clap::Parser;
use ecg_model::LinearLeadModel;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line configuration for the service
#[derive(Debug, Parser)]
#[command(name = "ecg-server", about = "12-lead ECG reconstruction service")]
struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5001)]
    port: u16,

    /// Path to the generative model weight file
    #[arg(long, default_value = "generator_model.json")]
    model: PathBuf,

    /// Directory holding WFDB record pairs
    #[arg(long, default_value = ".")]
    record_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = ServerConfig::parse();

    // Model load happens once; a missing or broken model only disables
    // precordial synthesis, it never stops the server
    let model = match LinearLeadModel::load(&config.model) {
        Ok(model) => Some(Arc::new(model)),
        Err(err) => {
            tracing::warn!(%err, "running without precordial synthesis");
            None
        }
    };

    let state = AppState {
        model,
        record_dir: config.record_dir,
    };
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "ECG service listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
