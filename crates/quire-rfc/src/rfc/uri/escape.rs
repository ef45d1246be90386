//! Path escaping, href formatting and mount prefix handling.

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped in a URI path. `/` and the sub-delimiters stay literal.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes a path for use in an href or `Location` header.
#[must_use]
pub fn escape_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}

/// Percent-decodes a path. Invalid UTF-8 sequences are replaced.
#[must_use]
pub fn unescape(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// Formats a public path for the wire: collections gain a trailing `/`, then
/// the path is escaped.
#[must_use]
pub fn url_format(public_path: &str, is_collection: bool) -> String {
    if is_collection && !public_path.ends_with('/') {
        escape_path(&format!("{public_path}/"))
    } else {
        escape_path(public_path)
    }
}

/// Returns whether `path` lies at or below the mount `prefix`.
#[must_use]
pub fn is_within_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path.starts_with('/');
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Strips the mount `prefix`, yielding a `/`-rooted path relative to it.
///
/// Paths outside the prefix are returned unchanged.
#[must_use]
pub fn clean_path(path: &str, prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() || !is_within_prefix(path, trimmed) {
        return path.to_string();
    }
    let rest = &path[trimmed.len()..];
    if rest.is_empty() {
        "/".to_string()
    } else {
        rest.to_string()
    }
}

/// Formats a timestamp as an HTTP-date (RFC 7231 IMF-fixdate).
#[must_use]
pub fn http_date(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Scheme, host and port a request arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

impl Origin {
    /// Creates an origin.
    #[must_use]
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Returns `scheme://host:port`. The port is always present.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Joins an already formatted path onto the origin.
    #[must_use]
    pub fn absolute_href(&self, formatted_path: &str) -> String {
        format!("{}{}", self.base_url(), formatted_path)
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::new("http", "localhost", 80)
    }
}
