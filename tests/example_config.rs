use std::path::Path;

use geo_redirect::config::load_config;
use geo_redirect::redirect::StatusMode;
use geo_redirect::{GeoRedirect, StaticResolver};
use std::sync::Arc;

#[test]
fn test_example_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("geo-redirect.example.toml");
    let config = load_config(&path).unwrap();

    assert_eq!(config.redirects.len(), 2);
    assert!(config.observability.metrics_enabled);

    let rules: Vec<GeoRedirect> = config
        .redirects
        .into_iter()
        .map(|rule| GeoRedirect::new(rule, Arc::new(StaticResolver::new())).unwrap())
        .collect();

    assert_eq!(rules[0].name(), "fr-home");
    assert_eq!(rules[0].mode(), StatusMode::Temporary);
    assert_eq!(rules[1].name(), "/old-pricing");
    assert_eq!(rules[1].mode(), StatusMode::Permanent);
    assert!(rules[1].is_catch_all());
}
