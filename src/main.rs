//! Geo/language redirect host.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────────────┐
//!                    │                     GEO REDIRECT                        │
//!   Client Request   │  ┌──────────┐   ┌─────────────┐   ┌─────────────┐      │
//!   ─────────────────┼─▶│  http    │──▶│ redirect    │──▶│ redirect    │──┐   │
//!                    │  │ server   │   │ rule #1     │   │ rule #n     │  │   │
//!                    │  └──────────┘   └──────┬──────┘   └──────┬──────┘  │   │
//!                    │                        │  ┌─────────┐    │         ▼   │
//!                    │                        └─▶│  geo    │◀───┘    fallback │
//!   Client Response  │     301/302/307/308       │resolver │          handler │
//!   ◀────────────────┼───────────────────────── └─────────┘                  │
//!                    └────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use geo_redirect::config::load_config;
use geo_redirect::http::server::shutdown_signal;
use geo_redirect::observability::{logging::init_logging, metrics::init_metrics};
use geo_redirect::{HttpServer, MaxMindResolver};

#[derive(Parser)]
#[command(name = "geo-redirect")]
#[command(about = "Redirect requests by client country and language", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "geo-redirect.toml")]
    config: PathBuf,

    /// Validate the configuration and database, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability);

    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.listener.bind_address,
        rules = config.redirects.len(),
        "geo-redirect v0.1.0 starting"
    );

    // Opened once for the process lifetime; every rule shares this handle.
    let resolver = Arc::new(MaxMindResolver::open(&config.geoip.database_path)?);
    let server = HttpServer::new(config, resolver.clone())?;

    if cli.check {
        tracing::info!(
            database_type = %resolver.database_type(),
            rules = server.config().redirects.len(),
            "Configuration OK"
        );
        return Ok(());
    }

    let observability = &server.config().observability;
    if observability.metrics_enabled {
        init_metrics(observability.metrics_address.parse()?);
    }

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
