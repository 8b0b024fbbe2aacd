//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and addresses
//! - Reject redirect rules that could never be installed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one redirect rule is required")]
    NoRedirects,

    #[error("redirect #{index}: 'from' must not be empty")]
    EmptyFrom { index: usize },

    #[error("redirect #{index}: 'to' must not be empty")]
    EmptyTo { index: usize },

    #[error("redirect #{index}: 'from' must be an absolute path, got '{from}'")]
    RelativeFrom { index: usize, from: String },

    #[error("redirect #{index}: empty entry in '{field}'")]
    EmptyEntry { index: usize, field: &'static str },

    #[error("geoip.database_path must not be empty")]
    EmptyDatabasePath,

    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.geoip.database_path.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabasePath);
    }

    if config.redirects.is_empty() {
        errors.push(ValidationError::NoRedirects);
    }

    for (index, rule) in config.redirects.iter().enumerate() {
        if rule.from.is_empty() {
            errors.push(ValidationError::EmptyFrom { index });
        } else if !rule.from.starts_with('/') {
            errors.push(ValidationError::RelativeFrom {
                index,
                from: rule.from.clone(),
            });
        }

        if rule.to.is_empty() {
            errors.push(ValidationError::EmptyTo { index });
        }

        if rule.country.iter().any(|c| c.trim().is_empty()) {
            errors.push(ValidationError::EmptyEntry { index, field: "country" });
        }
        if rule.language.iter().any(|l| l.trim().is_empty()) {
            errors.push(ValidationError::EmptyEntry { index, field: "language" });
        }

        if let Some(status) = rule.status {
            if status != 301 && status != 302 {
                tracing::warn!(
                    rule = %rule.display_name(),
                    status,
                    "Unrecognized redirect status, using temporary redirects"
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
