//! Client IP extraction.
//!
//! The peer address of the connection wins. The `X-Real-Ip` header is only
//! consulted when the peer address is missing or not an IP socket address
//! (e.g. a unix socket). No trusted-proxy filtering happens here.

use std::net::{IpAddr, SocketAddr};

/// Header carrying the client address set by an upstream proxy.
pub const X_REAL_IP: &str = "x-real-ip";

/// Derive the caller's IP, or `None` if neither source parses.
pub fn client_ip(remote_addr: Option<&str>, real_ip: Option<&str>) -> Option<IpAddr> {
    remote_addr
        .and_then(parse_socket_ip)
        .or_else(|| real_ip.and_then(parse_forwarded_ip))
}

fn parse_socket_ip(value: &str) -> Option<IpAddr> {
    value.trim().parse::<SocketAddr>().ok().map(|addr| addr.ip())
}

/// Accepts `ip:port`, `[v6]:port`, `[v6]` and a bare address.
fn parse_forwarded_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    parse_socket_ip(value).or_else(|| {
        value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(value)
            .parse::<IpAddr>()
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_prefers_peer_address() {
        assert_eq!(
            client_ip(Some("203.0.113.7:51234"), Some("198.51.100.1")),
            Some(ip("203.0.113.7"))
        );
        assert_eq!(client_ip(Some("[2001:db8::1]:443"), None), Some(ip("2001:db8::1")));
    }

    #[test]
    fn test_falls_back_to_header() {
        assert_eq!(
            client_ip(Some("/run/proxy.sock"), Some("198.51.100.1:8080")),
            Some(ip("198.51.100.1"))
        );
        assert_eq!(client_ip(None, Some("198.51.100.1")), Some(ip("198.51.100.1")));
        assert_eq!(client_ip(None, Some(" [2001:db8::2] ")), Some(ip("2001:db8::2")));
        assert_eq!(client_ip(Some("@"), Some("2001:db8::3")), Some(ip("2001:db8::3")));
    }

    #[test]
    fn test_unparsable_sources_yield_none() {
        assert_eq!(client_ip(None, None), None);
        assert_eq!(client_ip(Some("garbage"), Some("not-an-ip")), None);
        assert_eq!(client_ip(Some(""), Some("")), None);
        // Peer address without a port is not a socket address.
        assert_eq!(client_ip(Some("203.0.113.7"), None), None);
    }
}
