//! Multistatus response types.

use quire_core::constants::DEFAULT_HTTP_VERSION;

use super::href::Href;
use super::property::DavProperty;

/// A multistatus response (RFC 4918 §13).
#[derive(Debug, Clone)]
pub struct Multistatus {
    /// Individual responses.
    pub responses: Vec<PropstatResponse>,
    /// Optional response description.
    pub description: Option<String>,
    /// Protocol version echoed in every status line.
    pub http_version: String,
}

impl Multistatus {
    /// Creates an empty multistatus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            description: None,
            http_version: DEFAULT_HTTP_VERSION.to_string(),
        }
    }

    /// Sets the protocol version used in status lines.
    #[must_use]
    pub fn with_http_version(mut self, version: impl Into<String>) -> Self {
        self.http_version = version.into();
        self
    }

    /// Adds a response.
    pub fn add_response(&mut self, response: PropstatResponse) {
        self.responses.push(response);
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl Default for Multistatus {
    fn default() -> Self {
        Self::new()
    }
}

/// The payload of a single response: either property groups or one bare status.
///
/// A response never carries both.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// Property statuses grouped by status code.
    Propstats(Vec<Propstat>),
    /// A bare status for the whole resource.
    Status(Status),
}

/// A single response within a multistatus.
#[derive(Debug, Clone)]
pub struct PropstatResponse {
    /// The resource href.
    pub href: Href,
    /// The response payload.
    pub body: ResponseBody,
    /// Optional response description.
    pub description: Option<String>,
}

impl PropstatResponse {
    /// Creates a response with found and not-found properties.
    ///
    /// Empty groups are omitted.
    #[must_use]
    pub fn with_found_and_not_found(
        href: impl Into<Href>,
        found: Vec<DavProperty>,
        not_found: Vec<DavProperty>,
    ) -> Self {
        let mut propstats = Vec::new();

        if !found.is_empty() {
            propstats.push(Propstat::new(Status::Ok, found));
        }

        if !not_found.is_empty() {
            propstats.push(Propstat::new(Status::NotFound, not_found));
        }

        Self {
            href: href.into(),
            body: ResponseBody::Propstats(propstats),
            description: None,
        }
    }

    /// Creates a response that reports only a status for the resource.
    #[must_use]
    pub fn status(href: impl Into<Href>, status: Status) -> Self {
        Self {
            href: href.into(),
            body: ResponseBody::Status(status),
            description: None,
        }
    }

    /// Returns the propstat groups, if this is a property response.
    #[must_use]
    pub fn propstats(&self) -> &[Propstat] {
        match &self.body {
            ResponseBody::Propstats(propstats) => propstats,
            ResponseBody::Status(_) => &[],
        }
    }
}

/// Property status grouping.
#[derive(Debug, Clone)]
pub struct Propstat {
    /// HTTP status.
    pub status: Status,
    /// Properties with this status.
    pub properties: Vec<DavProperty>,
    /// Optional description.
    pub description: Option<String>,
}

impl Propstat {
    /// Creates a new propstat.
    #[must_use]
    pub fn new(status: Status, properties: Vec<DavProperty>) -> Self {
        Self {
            status,
            properties,
            description: None,
        }
    }
}

/// HTTP status reported inside a multistatus body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 207 Multi-Status
    MultiStatus,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 409 Conflict
    Conflict,
    /// 412 Precondition Failed
    PreconditionFailed,
    /// 423 Locked
    Locked,
    /// 424 Failed Dependency
    FailedDependency,
    /// 502 Bad Gateway
    BadGateway,
    /// 507 Insufficient Storage
    InsufficientStorage,
    /// Custom status
    Custom(u16),
}

impl Status {
    /// Returns the status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::MultiStatus => 207,
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Conflict => 409,
            Self::PreconditionFailed => 412,
            Self::Locked => 423,
            Self::FailedDependency => 424,
            Self::BadGateway => 502,
            Self::InsufficientStorage => 507,
            Self::Custom(code) => *code,
        }
    }

    /// Returns the status line, e.g. `HTTP/1.1 201 Created`.
    #[must_use]
    pub fn status_line(&self, http_version: &str) -> String {
        format!("{http_version} {} {}", self.code(), self.reason_phrase())
    }

    /// Returns the reason phrase.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Created => "Created",
            Self::NoContent => "No Content",
            Self::MultiStatus => "Multi-Status",
            Self::BadRequest => "Bad Request",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Conflict => "Conflict",
            Self::PreconditionFailed => "Precondition Failed",
            Self::Locked => "Locked",
            Self::FailedDependency => "Failed Dependency",
            Self::BadGateway => "Bad Gateway",
            Self::InsufficientStorage => "Insufficient Storage",
            Self::Custom(_) => "Unknown",
        }
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        match code {
            200 => Self::Ok,
            201 => Self::Created,
            204 => Self::NoContent,
            207 => Self::MultiStatus,
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            409 => Self::Conflict,
            412 => Self::PreconditionFailed,
            423 => Self::Locked,
            424 => Self::FailedDependency,
            502 => Self::BadGateway,
            507 => Self::InsufficientStorage,
            _ => Self::Custom(code),
        }
    }
}
