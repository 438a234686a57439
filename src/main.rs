use anyhow::Result;
use chat_relay::{Config, RelayServer};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Relay browser chat messages to a generative-language provider
#[derive(Debug, Parser)]
#[command(name = "chat-relay", version)]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config/chat-relay")]
    config: String,

    /// Override the listener port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load(&cli.config)?;
    if let Some(port) = cli.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!(
        "Provider model: {} (dispatch: {:?}, timeout: {}s)",
        cfg.provider.model, cfg.session.dispatch, cfg.provider.timeout_secs
    );

    let server = RelayServer::from_config(&cfg).await?;
    server.serve().await
}
