use std::net::SocketAddr;

use axum::http::HeaderMap;

pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Source address of a request: a non-empty `X-Real-Ip` set by the fronting
/// proxy, else the host part of the peer address. Header bytes outside
/// visible ASCII are kept, with invalid UTF-8 replaced.
pub fn resolve_client_ip(headers: &HeaderMap, remote: SocketAddr) -> String {
    headers
        .get(REAL_IP_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| remote.ip().to_canonical().to_string())
}
