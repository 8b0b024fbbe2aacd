//! Geolocation subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     geoip.database_path → MaxMindResolver::open (once per process)
//!     → Arc<dyn GeoResolver> handed to every GeoRedirect
//!
//! Per request (only when the rule's path matches):
//!     client IP → GeoResolver::resolve → Some("FR") | None
//! ```
//!
//! # Design Decisions
//! - Lookups are local and synchronous; no timeouts, no caching
//! - A failed lookup is "country unknown", never a request error
//! - The trait keeps rules testable without a database file

pub mod resolver;

pub use resolver::{GeoError, GeoResolver, MaxMindResolver, StaticResolver};
