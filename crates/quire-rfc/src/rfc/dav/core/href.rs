//! DAV href type.

use std::fmt;

/// A `WebDAV` href (URL reference), already escaped for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Href(pub String);

impl Href {
    /// Creates a new href.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the href as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this href ends with a slash.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Ensures the href ends with a slash (for collections).
    #[must_use]
    pub fn with_trailing_slash(self) -> Self {
        if self.0.ends_with('/') {
            self
        } else {
            Self(format!("{}/", self.0))
        }
    }

    /// URL-decodes the href.
    #[must_use]
    pub fn decode(&self) -> String {
        crate::rfc::uri::unescape(&self.0)
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Href {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Href {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
