//! Server binary for docsmith.
//!
//! A thin shim over the library crate: parse bind flags, initialise
//! tracing, serve the router.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Address to bind.
    #[arg(long, env = "DOCSMITH_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "DOCSMITH_PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("docsmith listening on {addr}");
    tracing::info!("  - POST /api/format");
    tracing::info!("  - GET  /health");

    axum::serve(listener, docsmith::server::router())
        .await
        .context("server error")?;

    Ok(())
}
