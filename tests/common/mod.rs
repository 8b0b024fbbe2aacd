//! Shared helpers for integration tests.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use geo_redirect::config::{RedirectConfig, ServerConfig};
use geo_redirect::{GeoResolver, HttpServer, StaticResolver};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const FR_IP: &str = "203.0.113.7";
pub const DE_IP: &str = "198.51.100.20";

/// Resolver knowing one French, one German and the loopback address.
pub fn resolver() -> Arc<dyn GeoResolver> {
    Arc::new(
        StaticResolver::new()
            .with(FR_IP.parse().unwrap(), "FR")
            .with(DE_IP.parse().unwrap(), "DE")
            .with(IpAddr::from([127, 0, 0, 1]), "FR"),
    )
}

pub fn rule(from: &str, to: &str, country: &[&str], language: &[&str]) -> RedirectConfig {
    let mut rule = RedirectConfig::new(from, to);
    rule.country = country.iter().map(|c| c.to_string()).collect();
    rule.language = language.iter().map(|l| l.to_string()).collect();
    rule
}

pub fn config(redirects: Vec<RedirectConfig>) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.geoip.database_path = "unused.mmdb".into();
    config.redirects = redirects;
    config
}

/// Serve `config` on an ephemeral port. Dropping the sender stops the server.
pub async fn spawn_server(config: ServerConfig) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, resolver()).unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = server
            .run(listener, async move {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
