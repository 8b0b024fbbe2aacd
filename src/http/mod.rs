//! HTTP host for the redirect chain.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, ConnectInfo, graceful shutdown)
//!     → request.rs (assign / propagate x-request-id)
//!     → redirect layer per rule (first configured rule runs first)
//!     → fallback handler when every rule forwards
//! ```

pub mod request;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::HttpServer;
