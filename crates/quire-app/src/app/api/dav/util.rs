use salvo::http::Version;
use salvo::{Depot, Request};

use crate::config::get_config_from_depot;
use quire_core::constants::DEFAULT_HTTP_VERSION;
use quire_rfc::rfc::uri::Origin;

/// ## Summary
/// Returns the request origin, preferring the `Host` header and falling back to server config.
///
/// The port defaults to the scheme's well-known port when the `Host` header omits it.
#[must_use]
pub fn request_origin(req: &Request, depot: &Depot) -> Origin {
    let scheme = if req.uri().scheme_str() == Some("https") {
        "https"
    } else {
        "http"
    };

    let authority = req
        .headers()
        .get("Host")
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().authority().map(salvo::http::uri::Authority::as_str))
        .filter(|h| !h.is_empty());

    if let Some(authority) = authority {
        let (host, port) = split_authority(authority);
        return Origin::new(scheme, host, port.unwrap_or_else(|| default_port(scheme)));
    }

    match get_config_from_depot(depot) {
        Ok(settings) => Origin::new(scheme, settings.server.host.clone(), settings.server.port),
        Err(e) => {
            tracing::warn!(error = %e, "Configuration missing; falling back to localhost origin");
            Origin::new(scheme, "localhost", default_port(scheme))
        }
    }
}

/// Splits `host[:port]`, keeping bracketed IPv6 literals intact.
///
/// The brackets stay on the host so it compares equal to the host of an
/// absolute `Destination` URL.
fn split_authority(authority: &str) -> (&str, Option<u16>) {
    if authority.starts_with('[')
        && let Some(end) = authority.find(']')
    {
        let (literal, tail) = authority.split_at(end + 1);
        let port = tail.strip_prefix(':').and_then(|p| p.parse().ok());
        return (literal, port);
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse() {
            Ok(port) => (host, Some(port)),
            Err(_) => (host, None),
        },
        _ => (authority, None),
    }
}

fn default_port(scheme: &str) -> u16 {
    if scheme == "https" { 443 } else { 80 }
}

/// Returns the protocol version for multistatus status lines.
#[must_use]
pub fn http_version(req: &Request) -> &'static str {
    match req.version() {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => DEFAULT_HTTP_VERSION,
    }
}
