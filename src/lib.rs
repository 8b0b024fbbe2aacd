//! Geo/language redirect middleware for an HTTP reverse proxy.

pub mod config;
pub mod geo;
pub mod http;
pub mod observability;
pub mod redirect;

pub use config::schema::ServerConfig;
pub use geo::{GeoResolver, MaxMindResolver, StaticResolver};
pub use http::HttpServer;
pub use redirect::{GeoRedirect, RedirectError};
