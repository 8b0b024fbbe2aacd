//! Language preference extraction.
//!
//! # Rules
//! - A `lang` cookie is authoritative: its raw value is the only candidate
//! - Otherwise `Accept-Language` is parsed as weighted tags, highest q first
//! - At most [`MAX_CANDIDATES`] tags are kept
//!
//! Tags are not validated or canonicalized; matching downstream is a
//! case-insensitive string comparison.

/// Cookie holding an explicit language choice.
pub const LANG_COOKIE: &str = "lang";

/// Upper bound on candidates taken from `Accept-Language`.
pub const MAX_CANDIDATES: usize = 4;

/// Preference-ordered language codes for a request.
pub fn language_candidates(cookie: Option<&str>, accept_language: Option<&str>) -> Vec<String> {
    if let Some(lang) = cookie {
        return vec![lang.to_string()];
    }

    let mut tags = accept_language.map(parse_accept_language).unwrap_or_default();
    tags.truncate(MAX_CANDIDATES);
    tags
}

/// Parse `tag;q=value, ...` into tags sorted by descending weight.
///
/// Ties keep header order. Entries with `q=0`, the `*` wildcard and
/// malformed weights are dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in parts {
                let (key, value) = param.split_once('=')?;
                if key.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse().ok()?;
                }
            }

            if !(quality > 0.0 && quality <= 1.0) {
                return None;
            }
            Some((tag.to_string(), quality))
        })
        .collect();

    // sort_by is stable, so equal weights keep their header order
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

/// Value of cookie `name` from one or more `Cookie` header values.
pub fn cookie_value<'a, I>(headers: I, name: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}
