use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use finsight_core::{Config, config_file};
use finsight_pdf_mupdf::MupdfBackend;
use finsight_web::{AppState, server};

/// FinSight AI backend - upload a report PDF and ask questions about it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to bind (overrides FINSIGHT_HOST and the config file)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides FINSIGHT_PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML config file, used instead of the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => config_file::load_from_path(path)
            .with_context(|| format!("could not load config file {}", path.display()))?,
        None => config_file::load_config(),
    };

    let mut config = Config::from_env(file);
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    if config.api_key.is_none() {
        tracing::warn!("COHERE_API_KEY is not set; /ask requests will fail until it is");
    }

    let state = Arc::new(
        AppState::new(
            Arc::new(MupdfBackend::new()),
            Arc::new(config.cohere_client()),
        )
        .with_generation_params(config.generation.clone())
        .with_sniff_magic(config.sniff_magic),
    );

    let app = finsight_web::router(state, &config);

    let listener = server::bind_with_fallback(&config.host, config.port)
        .await
        .with_context(|| format!("failed to bind {}", config.host))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        model = %config.generation.model,
        "FinSight AI backend listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
