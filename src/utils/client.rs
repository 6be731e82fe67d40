use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, Extensions, HeaderMap},
};

use crate::AppState;

/// Caller address. Proxy headers (first `X-Forwarded-For` hop, then
/// `X-Real-IP`) are only honoured with `trust_proxy_headers`; otherwise the
/// socket peer is the only source.
pub fn client_ip(
    headers: &HeaderMap,
    extensions: &Extensions,
    trust_proxy_headers: bool,
) -> Option<IpAddr> {
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    if !trust_proxy_headers {
        return peer;
    }

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok());
    if forwarded.is_some() {
        return forwarded;
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok());
    if real_ip.is_some() {
        return real_ip;
    }

    peer
}

#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.chars().take(512).collect());
        Ok(ClientInfo {
            ip: client_ip(
                &parts.headers,
                &parts.extensions,
                state.config.trust_proxy_headers,
            ),
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn proxied_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.7, 172.16.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        headers
    }

    fn peer(addr: &str) -> Extensions {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo::<SocketAddr>(addr.parse().unwrap()));
        extensions
    }

    #[test]
    fn trusted_proxy_uses_first_forwarded_hop() {
        let ip = client_ip(&proxied_headers(), &peer("192.168.1.5:5000"), true);
        assert_eq!(ip, Some("10.0.0.7".parse().unwrap()));
    }

    #[test]
    fn forwarded_headers_are_ignored_by_default() {
        let ip = client_ip(&proxied_headers(), &peer("192.168.1.5:5000"), false);
        assert_eq!(ip, Some("192.168.1.5".parse().unwrap()));
        assert_eq!(client_ip(&proxied_headers(), &Extensions::new(), false), None);
    }

    #[test]
    fn falls_back_to_socket_peer() {
        let ip = client_ip(&HeaderMap::new(), &peer("192.168.1.5:5000"), true);
        assert_eq!(ip, Some("192.168.1.5".parse().unwrap()));
        assert_eq!(client_ip(&HeaderMap::new(), &Extensions::new(), true), None);
    }
}
