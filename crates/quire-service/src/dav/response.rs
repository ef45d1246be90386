//! Transport-neutral response produced by the method services.

use salvo::http::StatusCode;

use quire_rfc::rfc::dav::core::DavError;

/// Content type of multistatus bodies.
pub const MULTISTATUS_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Status, headers and optional body to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl DavResponse {
    /// Creates a bodiless response.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a `207 Multi-Status` response carrying `xml`.
    #[must_use]
    pub fn multistatus(xml: String) -> Self {
        Self::new(StatusCode::MULTI_STATUS)
            .with_header("Content-Type", MULTISTATUS_CONTENT_TYPE)
            .with_body(xml)
    }

    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the first value of header `name`, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl From<DavError> for DavResponse {
    fn from(err: DavError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status)
    }
}
