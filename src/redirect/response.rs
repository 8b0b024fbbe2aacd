//! Redirect response construction.

use axum::{
    body::Body,
    http::{header, Method, Response, StatusCode},
    response::IntoResponse,
};
use url::{ParseError, Position, Url};

use crate::redirect::rule::StatusMode;

/// Stand-in origin for resolving relative destinations; never emitted.
const PLACEHOLDER_BASE: &str = "http://placeholder.invalid/";

/// GET keeps the 301/302 codes; every other method, HEAD included, gets
/// 307/308 so clients do not rewrite the method.
pub fn redirect_status(method: &Method, mode: StatusMode) -> StatusCode {
    let is_get = method == Method::GET;
    match (mode, is_get) {
        (StatusMode::Temporary, true) => StatusCode::FOUND,
        (StatusMode::Temporary, false) => StatusCode::TEMPORARY_REDIRECT,
        (StatusMode::Permanent, true) => StatusCode::MOVED_PERMANENTLY,
        (StatusMode::Permanent, false) => StatusCode::PERMANENT_REDIRECT,
    }
}

/// Normalize a destination into a `Location` value.
///
/// Absolute URLs are serialized as parsed. Relative references stay
/// relative: they are resolved against a placeholder origin to validate and
/// percent-encode them, then cut back to the form they were written in.
pub fn normalize_destination(destination: &str) -> Result<String, ParseError> {
    match Url::parse(destination) {
        Ok(url) => Ok(url.into()),
        Err(ParseError::RelativeUrlWithoutBase) => normalize_relative(destination),
        Err(e) => Err(e),
    }
}

fn normalize_relative(reference: &str) -> Result<String, ParseError> {
    if reference.starts_with("//") {
        let resolved = Url::parse(PLACEHOLDER_BASE)?.join(reference)?;
        let scheme_len = resolved.scheme().len() + 1;
        return Ok(resolved.as_str()[scheme_len..].to_owned());
    }

    if reference.starts_with(['/', '\\']) {
        let resolved = Url::parse(PLACEHOLDER_BASE)?.join(reference)?;
        return Ok(resolved[Position::BeforePath..].to_owned());
    }

    if reference.starts_with('?') {
        let resolved = Url::parse(PLACEHOLDER_BASE)?.join(reference)?;
        return Ok(resolved[Position::AfterPath..].to_owned());
    }

    if reference.starts_with('#') {
        let resolved = Url::parse(PLACEHOLDER_BASE)?.join(reference)?;
        return Ok(resolved[Position::AfterQuery..].to_owned());
    }

    // Deep enough that leading `..` segments are not clamped at the root.
    let path = reference.split(['?', '#']).next().unwrap_or_default();
    let depth = path.split('/').filter(|segment| *segment == "..").count();
    let base = Url::parse(&format!("{PLACEHOLDER_BASE}{}", "_/".repeat(depth)))?;
    let resolved = base.join(reference)?;

    match base.make_relative(&resolved) {
        Some(relative) if relative.is_empty() => Ok("./".to_owned()),
        Some(relative) => Ok(relative),
        None => Err(ParseError::RelativeUrlWithoutBase),
    }
}

/// Build the redirect to `destination`.
///
/// An unparsable destination yields `502 Bad Gateway`.
pub fn redirect_response(destination: &str, method: &Method, mode: StatusMode) -> Response<Body> {
    let location = match normalize_destination(destination) {
        Ok(location) => location,
        Err(e) => {
            tracing::error!(destination = %destination, error = %e, "Invalid redirect destination");
            return bad_gateway();
        }
    };

    let status = redirect_status(method, mode);
    let reason = status.canonical_reason().unwrap_or_default();

    Response::builder()
        .status(status)
        .header(header::LOCATION, location)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(reason))
        .unwrap_or_else(|e| {
            tracing::error!(
                destination = %destination,
                error = %e,
                "Failed to build redirect response"
            );
            bad_gateway()
        })
}

fn bad_gateway() -> Response<Body> {
    (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
}
