//! Client identity used for rate limiting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Key used when neither forwarding headers nor a peer address are available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derives the rate limiting key for a request.
///
/// Preference order:
/// 1. First comma-separated value of `X-Forwarded-For`, trimmed
/// 2. `X-Real-IP`, as sent
/// 3. IP of the peer socket
///
/// A header counts as present only when it is non-empty. Clients behind one NAT
/// without forwarding headers share a single key.
pub fn client_key(headers: &HeaderMap, remote: Option<SocketAddr>) -> String {
    if let Some(forwarded) = header_str(headers, X_FORWARDED_FOR) {
        let first = forwarded.split(',').next().unwrap_or(forwarded);
        return first.trim().to_owned();
    }

    if let Some(real_ip) = header_str(headers, X_REAL_IP) {
        return real_ip.to_owned();
    }

    remote
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_owned())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn remote() -> Option<SocketAddr> {
        Some("192.0.2.10:54321".parse().unwrap())
    }

    #[test]
    fn test_forwarded_for_first_value_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1, 10.0.0.2"),
        );
        headers.insert(X_REAL_IP, HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_key(&headers, remote()), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_used_without_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_key(&headers, remote()), "198.51.100.1");
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static(""));
        headers.insert(X_REAL_IP, HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_key(&headers, remote()), "198.51.100.1");
    }

    #[test]
    fn test_peer_address_fallback_drops_port() {
        assert_eq!(client_key(&HeaderMap::new(), remote()), "192.0.2.10");
    }

    #[test]
    fn test_unknown_without_any_source() {
        assert_eq!(client_key(&HeaderMap::new(), None), UNKNOWN_CLIENT);
    }
}
