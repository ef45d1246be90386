//! `Destination` header parsing for MOVE and COPY.

use super::escape::unescape;

/// A parsed `Destination` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// URI scheme, when the header was absolute.
    pub scheme: Option<String>,
    /// Host without port or userinfo, when the header was absolute. IPv6
    /// literals keep their brackets.
    pub host: Option<String>,
    /// Explicit or scheme-default port.
    pub port: Option<u16>,
    /// Decoded path.
    pub path: String,
}

impl Destination {
    /// Parses a `Destination` header value.
    ///
    /// ## Summary
    /// Absolute `http`/`https` values are parsed with the `url` crate. If it
    /// rejects the authority, the scheme and authority are split off by hand:
    /// userinfo up to the last `@` is dropped, then a trailing `:port` of two
    /// to five digits. Any other value is taken as a path with no host.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let Some((scheme, rest)) = split_scheme(raw) else {
            return Self {
                scheme: None,
                host: None,
                port: None,
                path: unescape(raw),
            };
        };

        match url::Url::parse(raw) {
            Ok(url) => Self {
                scheme: Some(url.scheme().to_string()),
                host: url.host_str().map(str::to_string),
                port: url.port_or_known_default(),
                path: unescape(url.path()),
            },
            Err(e) => {
                tracing::debug!(error = %e, "Destination rejected by URL parser, splitting by hand");
                Self::split(scheme, rest)
            }
        }
    }

    fn split(scheme: &str, rest: &str) -> Self {
        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };
        let path = path.split(['?', '#']).next().unwrap_or("/");

        let host_port = strip_userinfo(authority);
        let host = strip_port(host_port);
        let port = host_port
            .strip_prefix(host)
            .and_then(|p| p.strip_prefix(':'))
            .and_then(|p| p.parse().ok());

        Self {
            scheme: Some(scheme.to_ascii_lowercase()),
            host: (!host.is_empty()).then(|| host.to_string()),
            port,
            path: unescape(path),
        }
    }
}

fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = raw.split_once("://")?;
    (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
        .then_some((scheme, rest))
}

/// Drops a leading `user[:password]@` from an authority.
#[must_use]
pub fn strip_userinfo(authority: &str) -> &str {
    match authority.rfind('@') {
        Some(idx) if idx > 0 => &authority[idx + 1..],
        _ => authority,
    }
}

/// Drops a trailing `:port` of two to five digits from a host.
#[must_use]
pub fn strip_port(host: &str) -> &str {
    if let Some((name, port)) = host.rsplit_once(':')
        && (2..=5).contains(&port.len())
        && port.bytes().all(|b| b.is_ascii_digit())
    {
        return name;
    }
    host
}

/// Compares two hosts, ignoring ASCII case.
#[must_use]
pub fn hosts_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
