//! Per-request redirect decision.
//!
//! # States
//! ```text
//! Idle ──path != from──────────────▶ PassThrough (no lookups)
//!   │
//!   └─path == from─▶ Evaluating ──match──▶ Redirect
//!                        │
//!                        └──no match────▶ Forward
//! ```
//!
//! # Match policy
//! Redirect when the resolved country is allowed, OR any language candidate
//! is allowed, OR the rule constrains neither. Comparisons are
//! case-insensitive. Nothing is cached between requests.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::ConnectInfo,
    http::{header, Method, Request},
};

use crate::redirect::locale::{cookie_value, language_candidates, LANG_COOKIE};
use crate::redirect::origin::{client_ip, X_REAL_IP};
use crate::redirect::rule::GeoRedirect;

/// Request data the decision depends on.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub path: String,
    pub method: Method,
    /// Peer address as `host:port`, when the connection has one.
    pub remote_addr: Option<String>,
    pub real_ip: Option<String>,
    pub lang_cookie: Option<String>,
    pub accept_language: Option<String>,
}

impl RequestContext {
    /// Capture the relevant parts of an inbound request.
    ///
    /// The peer address comes from `ConnectInfo<SocketAddr>`, which the
    /// server installs via `into_make_service_with_connect_info`.
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let headers = req.headers();
        let header_str = |name: &str| {
            headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
        };

        Self {
            path: req.uri().path().to_string(),
            method: req.method().clone(),
            remote_addr: req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string()),
            real_ip: header_str(X_REAL_IP),
            lang_cookie: cookie_value(
                headers.get_all(header::COOKIE).iter().filter_map(|v| v.to_str().ok()),
                LANG_COOKIE,
            ),
            accept_language: header_str("accept-language"),
        }
    }

    pub fn client_ip(&self) -> Option<IpAddr> {
        client_ip(self.remote_addr.as_deref(), self.real_ip.as_deref())
    }

    pub fn languages(&self) -> Vec<String> {
        language_candidates(self.lang_cookie.as_deref(), self.accept_language.as_deref())
    }
}

/// Outcome of evaluating one rule against one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Path differs from the rule's `from`; nothing was evaluated.
    PassThrough,
    /// Path matched but neither country nor language is allowed.
    Forward,
    /// Redirect to the rule's destination.
    Redirect,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::PassThrough => "pass_through",
            Decision::Forward => "forward",
            Decision::Redirect => "redirect",
        }
    }
}

impl GeoRedirect {
    /// Decide whether `ctx` should be redirected.
    pub fn evaluate(&self, ctx: &RequestContext) -> Decision {
        if ctx.path != self.from {
            return Decision::PassThrough;
        }

        if self.is_catch_all() || self.language_matches(ctx) || self.country_matches(ctx) {
            Decision::Redirect
        } else {
            Decision::Forward
        }
    }

    fn language_matches(&self, ctx: &RequestContext) -> bool {
        if self.languages.is_empty() {
            return false;
        }
        ctx.languages()
            .iter()
            .any(|lang| self.languages.contains(&lang.to_uppercase()))
    }

    fn country_matches(&self, ctx: &RequestContext) -> bool {
        if self.countries.is_empty() {
            return false;
        }
        let Some(ip) = ctx.client_ip() else {
            tracing::debug!(rule = %self.name, "Client IP unavailable, country unknown");
            return false;
        };

        match self.resolver.resolve(ip) {
            Some(country) => {
                tracing::debug!(
                    rule = %self.name,
                    ip = %ip,
                    country = %country,
                    "Resolved client country"
                );
                self.countries.contains(&country.to_uppercase())
            }
            None => false,
        }
    }
}
