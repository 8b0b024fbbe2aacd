//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build one `GeoRedirect` per configured rule, sharing one resolver
//! - Create the Axum Router with the redirect chain and a fallback handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve with peer addresses (`ConnectInfo`) and graceful shutdown

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::geo::GeoResolver;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::redirect::{chain_middleware, GeoRedirect, RedirectError};

/// HTTP server hosting the redirect chain.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server from a validated configuration.
    ///
    /// Fails if any rule cannot be constructed; no partial chain is built.
    pub fn new(
        config: ServerConfig,
        resolver: Arc<dyn GeoResolver>,
    ) -> Result<Self, RedirectError> {
        let rules = config
            .redirects
            .iter()
            .cloned()
            .map(|rule| GeoRedirect::new(rule, resolver.clone()).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        for rule in &rules {
            tracing::info!(
                rule = %rule.name(),
                from = %rule.from_path(),
                to = %rule.destination(),
                mode = ?rule.mode(),
                "Redirect rule installed"
            );
        }

        let router = Self::build_router(&config, rules);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, rules: Vec<Arc<GeoRedirect>>) -> Router {
        // The last layer added wraps the others, so add rules back to front.
        let router = rules.into_iter().rev().fold(
            Router::new().fallback(fallback_handler),
            |router, rule| {
                router.layer(middleware::from_fn_with_state(rule, chain_middleware::<GeoRedirect>))
            },
        );

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id(req),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rules = self.config.redirects.len(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Terminal handler reached when every rule forwards.
async fn fallback_handler(req: Request<Body>) -> impl IntoResponse {
    tracing::debug!(path = %req.uri().path(), "No redirect rule applied");
    (StatusCode::NOT_FOUND, "No matching route found")
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
