//! Transport-neutral request context.

use quire_core::constants::DEFAULT_HTTP_VERSION;
use quire_core::types::Identity;
use quire_rfc::rfc::dav::core::Depth;
use quire_rfc::rfc::uri::Origin;

/// The parts of an HTTP request the method services look at.
#[derive(Debug, Clone)]
pub struct DavRequest {
    pub method: String,
    /// Decoded request path, including the mount prefix.
    pub path: String,
    pub body: Vec<u8>,
    pub user_agent: Option<String>,
    /// Raw `Destination` header.
    pub destination: Option<String>,
    /// Parsed `Depth` header, `None` when absent.
    pub depth: Option<Depth>,
    /// `Overwrite` header; anything but `F` is true.
    pub overwrite: bool,
    pub origin: Origin,
    pub http_version: String,
    pub identity: Identity,
}

impl DavRequest {
    /// Creates an anonymous request with no body or headers of interest.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: Vec::new(),
            user_agent: None,
            destination: None,
            depth: None,
            overwrite: true,
            origin: Origin::default(),
            http_version: DEFAULT_HTTP_VERSION.to_string(),
            identity: Identity::Anonymous,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }
}

/// Parses an `Overwrite` header value. Only `F` disables overwriting.
#[must_use]
pub fn parse_overwrite(value: Option<&str>) -> bool {
    !value.is_some_and(|v| v.trim().eq_ignore_ascii_case("f"))
}
