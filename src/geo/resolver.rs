//! IP → country resolution.
//!
//! The database is opened once by the process and shared through
//! `Arc<dyn GeoResolver>`; rules never open, reload or close it.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use maxminddb::{geoip2, MaxMindDbError, Reader};
use thiserror::Error;

use crate::observability::metrics;

/// Errors raised while acquiring or validating a geolocation database.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("failed to open GeoIP database at '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: MaxMindDbError,
    },

    #[error("GeoIP database is unusable: {0}")]
    Unusable(String),
}

/// Synchronous IP → ISO country code lookup.
///
/// Implementations must be safe to call from many requests at once.
pub trait GeoResolver: Send + Sync {
    /// Returns the ISO-3166 alpha-2 code for `ip`, or `None` when the
    /// address is not covered or the lookup fails.
    fn resolve(&self, ip: IpAddr) -> Option<String>;

    /// Construction-time validation hook.
    fn check(&self) -> Result<(), GeoError> {
        Ok(())
    }
}

/// Resolver backed by a MaxMind Country or City database held in memory.
pub struct MaxMindResolver {
    reader: Reader<Vec<u8>>,
}

impl MaxMindResolver {
    /// Read the whole database file into memory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GeoError> {
        let path = path.as_ref();
        let reader = Reader::open_readfile(path).map_err(|source| GeoError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            database_type = %reader.metadata.database_type,
            build_epoch = reader.metadata.build_epoch,
            "GeoIP database loaded"
        );

        Ok(Self { reader })
    }

    /// Database edition, e.g. `GeoLite2-Country`.
    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }
}

impl GeoResolver for MaxMindResolver {
    fn resolve(&self, ip: IpAddr) -> Option<String> {
        // City records decode as Country too; only the country block is read.
        let code = match self.reader.lookup::<geoip2::Country>(ip) {
            Ok(record) => record
                .and_then(|r| r.country)
                .and_then(|c| c.iso_code)
                .map(String::from),
            Err(e) => {
                tracing::debug!(ip = %ip, error = %e, "GeoIP lookup failed");
                None
            }
        };

        metrics::record_lookup(code.is_some());
        code
    }

    fn check(&self) -> Result<(), GeoError> {
        if self.reader.metadata.node_count == 0 {
            return Err(GeoError::Unusable(format!(
                "{} contains no records",
                self.reader.metadata.database_type
            )));
        }
        Ok(())
    }
}

/// In-memory resolver with a fixed address table.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<IpAddr, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `ip` to `country`.
    pub fn with(mut self, ip: IpAddr, country: impl Into<String>) -> Self {
        self.entries.insert(ip, country.into());
        self
    }
}

impl GeoResolver for StaticResolver {
    fn resolve(&self, ip: IpAddr) -> Option<String> {
        let code = self.entries.get(&ip).cloned();
        metrics::record_lookup(code.is_some());
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTRY_FIXTURE: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/country-test.mmdb");

    #[test]
    fn test_static_resolver() {
        let resolver = StaticResolver::new().with("203.0.113.7".parse().unwrap(), "FR");

        assert_eq!(resolver.resolve("203.0.113.7".parse().unwrap()), Some("FR".into()));
        assert_eq!(resolver.resolve("198.51.100.1".parse().unwrap()), None);
        assert!(resolver.check().is_ok());
    }

    #[test]
    fn test_open_missing_database() {
        let err = MaxMindResolver::open("/nonexistent/GeoLite2-Country.mmdb")
            .err()
            .expect("opening a missing file must fail");

        assert!(matches!(err, GeoError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/GeoLite2-Country.mmdb"));
    }

    #[test]
    fn test_open_rejects_non_database_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"definitely not an mmdb file").unwrap();

        assert!(MaxMindResolver::open(file.path()).is_err());
    }

    #[test]
    fn test_maxmind_resolves_country_codes() {
        let resolver = MaxMindResolver::open(COUNTRY_FIXTURE).unwrap();

        assert_eq!(resolver.database_type(), "GeoIP2-Country-Test");
        assert!(resolver.check().is_ok());
        assert_eq!(resolver.resolve("203.0.113.7".parse().unwrap()), Some("FR".into()));
        assert_eq!(resolver.resolve("198.51.100.20".parse().unwrap()), Some("DE".into()));
    }

    #[test]
    fn test_maxmind_unknown_address_is_none() {
        let resolver = MaxMindResolver::open(COUNTRY_FIXTURE).unwrap();

        assert_eq!(resolver.resolve("192.0.2.1".parse().unwrap()), None);
        assert_eq!(resolver.resolve("203.0.112.1".parse().unwrap()), None);
        // IPv6 against an IPv4-only database is a lookup error, reported as no country.
        assert_eq!(resolver.resolve("2001:db8::1".parse().unwrap()), None);
    }
}
