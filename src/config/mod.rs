//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → one GeoRedirect per [[redirects]] entry
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields outside a rule's from/to have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    GeoIpConfig, ListenerConfig, LogFormat, ObservabilityConfig, RedirectConfig, ServerConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
