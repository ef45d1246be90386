//! DAV property types.

use chrono::{DateTime, Utc};

use super::namespace::{Namespace, QName};

/// A requested or reported property, identified by namespace and local name.
///
/// Two names are equal when both the namespace and the local name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyName(QName);

impl PropertyName {
    /// Creates a new property name.
    #[must_use]
    pub fn new(qname: QName) -> Self {
        Self(qname)
    }

    /// Creates a `DAV:` property name.
    #[must_use]
    pub fn dav(local_name: &'static str) -> Self {
        Self(QName::dav(local_name))
    }

    /// Returns the qualified name.
    #[must_use]
    pub fn qname(&self) -> &QName {
        &self.0
    }

    /// Returns the namespace.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.0.namespace
    }

    /// Returns the local name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.0.local_name()
    }
}

impl From<QName> for PropertyName {
    fn from(qname: QName) -> Self {
        Self(qname)
    }
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The outcome of PROPFIND body negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySelection {
    /// Every property the resource exposes (`allprop`, or no body).
    All,
    /// An explicit list of properties, in request order.
    Named(Vec<PropertyName>),
}

impl PropertySelection {
    /// Returns whether the selection resolves to the resource's own property set.
    ///
    /// An empty named list is treated the same as `allprop`.
    #[must_use]
    pub fn is_all(&self) -> bool {
        match self {
            Self::All => true,
            Self::Named(names) => names.is_empty(),
        }
    }
}

/// A DAV property with name and optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavProperty {
    /// The property name.
    pub name: PropertyName,
    /// The property value (`None` when the resource does not define it).
    pub value: Option<PropertyValue>,
}

impl DavProperty {
    /// Creates a property with a known value.
    #[must_use]
    pub fn new(name: PropertyName, value: PropertyValue) -> Self {
        Self {
            name,
            value: Some(value),
        }
    }

    /// Creates a property with no value (for 404 propstats).
    #[must_use]
    pub fn not_found(name: PropertyName) -> Self {
        Self { name, value: None }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: PropertyName, value: impl Into<String>) -> Self {
        Self::new(name, PropertyValue::Text(value.into()))
    }
}

/// A property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Empty element.
    Empty,
    /// Text content.
    Text(String),
    /// Single href.
    Href(String),
    /// Integer value.
    Integer(i64),
    /// Timestamp rendered as an HTTP-date (`getlastmodified`).
    HttpDate(DateTime<Utc>),
    /// Timestamp rendered as RFC 3339 (`creationdate`).
    DateTime(DateTime<Utc>),
    /// Resource type markers (empty for non-collections).
    ResourceType(Vec<QName>),
}

impl PropertyValue {
    /// Returns the text content of the value, if it renders as plain text.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) | Self::Href(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::HttpDate(dt) => Some(crate::rfc::uri::http_date(dt)),
            Self::DateTime(dt) => Some(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            Self::Empty | Self::ResourceType(_) => None,
        }
    }
}
