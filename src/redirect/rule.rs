//! Redirect rule construction.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::RedirectConfig;
use crate::geo::{GeoError, GeoResolver};

/// Errors that prevent a rule from being installed.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("you must provide 'from' and 'to'")]
    MissingEndpoints,

    #[error("geoip database initialization failed: {0}")]
    Database(#[from] GeoError),
}

/// Redirect permanence, chosen by the configured `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMode {
    Temporary,
    Permanent,
}

impl StatusMode {
    /// `301` means permanent; anything else, including no value, is temporary.
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(301) => StatusMode::Permanent,
            _ => StatusMode::Temporary,
        }
    }
}

/// One geo/language redirect rule with its resolver.
///
/// Immutable after construction and shared between requests via `Arc`.
pub struct GeoRedirect {
    pub(crate) name: String,
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) mode: StatusMode,
    /// Uppercased country codes.
    pub(crate) countries: HashSet<String>,
    /// Uppercased language codes.
    pub(crate) languages: HashSet<String>,
    pub(crate) resolver: Arc<dyn GeoResolver>,
}

impl GeoRedirect {
    /// Build a rule. Fails when `from` or `to` is empty or the resolver
    /// reports an unusable database.
    pub fn new(
        config: RedirectConfig,
        resolver: Arc<dyn GeoResolver>,
    ) -> Result<Self, RedirectError> {
        let name = config.display_name().to_string();
        tracing::debug!(rule = %name, "Creating middleware");
        tracing::debug!(
            rule = %name,
            "Setting up redirection from {} to {}",
            config.from,
            config.to
        );

        if config.from.is_empty() || config.to.is_empty() {
            return Err(RedirectError::MissingEndpoints);
        }
        resolver.check()?;

        Ok(Self {
            name,
            mode: StatusMode::from_status(config.status),
            countries: normalize(&config.country),
            languages: normalize(&config.language),
            from: config.from,
            to: config.to,
            resolver,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from_path(&self) -> &str {
        &self.from
    }

    pub fn destination(&self) -> &str {
        &self.to
    }

    pub fn mode(&self) -> StatusMode {
        self.mode
    }

    /// True when neither countries nor languages constrain the rule.
    pub fn is_catch_all(&self) -> bool {
        self.countries.is_empty() && self.languages.is_empty()
    }
}

impl fmt::Debug for GeoRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoRedirect")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("mode", &self.mode)
            .field("countries", &self.countries)
            .field("languages", &self.languages)
            .finish_non_exhaustive()
    }
}

pub(crate) fn normalize(codes: &[String]) -> HashSet<String> {
    codes.iter().map(|c| c.trim().to_uppercase()).collect()
}
