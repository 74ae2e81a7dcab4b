//! Client identification utilities
//!
//! Derives the identity a rate-limit budget is keyed on from request headers.

use axum::http::{HeaderMap, header};
use std::fmt;
use std::net::IpAddr;

use crate::crypto::{sha256, to_hex};

/// Who is making the request, as far as throttling is concerned
///
/// Preference order: client IP, then a hash of the User-Agent, then a shared
/// anonymous identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientIdentity {
    Ip(IpAddr),
    /// Hex SHA-256 of the User-Agent header
    UserAgent(String),
    Anonymous,
}

impl ClientIdentity {
    /// Resolve the identity of a request
    ///
    /// ## Arguments
    /// * `headers` - HTTP request headers
    /// * `peer_ip` - peer address of the connection, if known
    /// * `trust_forwarded` - honor `X-Forwarded-For`; only safe when every
    ///   connection arrives through a proxy that overwrites the header
    pub fn from_headers(headers: &HeaderMap, peer_ip: Option<IpAddr>, trust_forwarded: bool) -> Self {
        let ip = if trust_forwarded {
            extract_client_ip(headers, peer_ip)
        } else {
            peer_ip
        };

        if let Some(ip) = ip {
            return ClientIdentity::Ip(ip);
        }

        match headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
        {
            Some(ua) if !ua.is_empty() => ClientIdentity::UserAgent(to_hex(&sha256(ua.as_bytes()))),
            _ => ClientIdentity::Anonymous,
        }
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientIdentity::Ip(ip) => write!(f, "ip:{}", ip),
            ClientIdentity::UserAgent(hash) => write!(f, "ua:{}", hash),
            ClientIdentity::Anonymous => f.write_str("anonymous"),
        }
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // First entry of X-Forwarded-For is the original client
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
