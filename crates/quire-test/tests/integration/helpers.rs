#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building a Salvo service around an in-memory store
//! - Making HTTP requests as anonymous or authenticated callers
//! - Asserting on responses
//!
//! ## Identity
//! The test service authenticates through the `proxy` method, so a request
//! carrying `X-Remote-User` runs as that user and every other request is
//! anonymous.

use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};

use quire_test::component::config::{AuthMethod, Settings};
use quire_test::component::constants::DEFAULT_PROXY_USER_HEADER;
use quire_test::component::handlers::{ConfigHandler, ResourceFactoryHandler};

pub use quire_test::component::dav::memory::MemoryStore;
pub use tracing;

/// Host every test request is addressed to.
pub const TEST_HOST: &str = "localhost:5800";

/// A user agent carrying the Microsoft Office marker.
pub const OFFICE_USER_AGENT: &str = "Microsoft Office Word 2014";

/// Mount prefix used by the test service.
pub const PREFIX: &str = "/dav";

/// Returns the request path for `clean_path` below the mount prefix.
#[must_use]
pub fn dav_path(clean_path: &str) -> String {
    format!("{PREFIX}{clean_path}")
}

/// Returns the absolute URL for `clean_path`, as emitted in hrefs.
#[must_use]
pub fn dav_url(clean_path: &str) -> String {
    format!("http://{TEST_HOST}{PREFIX}{clean_path}")
}

/// ## Summary
/// Settings for the test service: proxy authentication and the `/dav` prefix.
///
/// ## Panics
/// Panics if the default configuration cannot be built.
#[must_use]
pub fn test_settings() -> Settings {
    let mut settings = Settings::defaults().expect("Default settings should build");
    settings.dav.mount_prefix = PREFIX.to_string();
    settings.auth.method = AuthMethod::Proxy;
    settings
}

/// A store with one project holding a folder (two documents) and a document.
#[must_use]
pub fn test_store() -> MemoryStore {
    MemoryStore::builder(PREFIX)
        .project("alpha", "Project Alpha")
        .folder("/alpha/specs")
        .document("/alpha/specs/one.txt", "text/plain", b"one")
        .document("/alpha/specs/two.txt", "text/plain", b"two")
        .document("/alpha/readme.txt", "text/plain", b"hello")
        .project("beta", "Project Beta")
        .build()
}

/// ## Summary
/// Creates a test service around `store`, wired the way the binary wires it.
///
/// ## Panics
/// Panics if the routes cannot be built.
#[must_use]
pub fn create_test_service(store: MemoryStore) -> Service {
    let router = Router::new()
        .hoop(ConfigHandler::new(test_settings()))
        .hoop(ResourceFactoryHandler { factory: store })
        .push(quire_test::app::api::routes().expect("API routes should be valid"));
    Service::new(router)
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: vec![("Host".to_string(), TEST_HOST.to_string())],
            body: None,
        }
    }

    /// Creates a new OPTIONS request.
    #[must_use]
    pub fn options(path: &str) -> Self {
        Self::new(Method::OPTIONS, path)
    }

    /// Creates a new HEAD request.
    #[must_use]
    pub fn head(path: &str) -> Self {
        Self::new(Method::HEAD, path)
    }

    /// Creates a new PROPFIND request.
    #[must_use]
    pub fn propfind(path: &str) -> Self {
        Self::new(Method::from_bytes(b"PROPFIND").expect("Valid method"), path)
    }

    /// Creates a new COPY request.
    #[must_use]
    pub fn copy(path: &str) -> Self {
        Self::new(Method::from_bytes(b"COPY").expect("Valid method"), path)
    }

    /// Alias for MOVE (since 'move' is a reserved keyword).
    #[must_use]
    pub fn move_resource(path: &str) -> Self {
        Self::new(Method::from_bytes(b"MOVE").expect("Valid method"), path)
    }

    /// Adds a header to the request, replacing an earlier one of the same name.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Runs the request as `user`.
    #[must_use]
    pub fn as_user(self, user: &str) -> Self {
        self.header(DEFAULT_PROXY_USER_HEADER, user)
    }

    /// Sets the User-Agent header.
    #[must_use]
    pub fn user_agent(self, agent: &str) -> Self {
        self.header("User-Agent", agent)
    }

    /// Sets the Depth header.
    #[must_use]
    pub fn depth(self, depth: &str) -> Self {
        self.header("Depth", depth)
    }

    /// Sets the Destination header for COPY/MOVE.
    #[must_use]
    pub fn destination(self, dest: &str) -> Self {
        self.header("Destination", dest)
    }

    /// Sets the Overwrite header for COPY/MOVE.
    #[must_use]
    pub fn overwrite(self, value: bool) -> Self {
        self.header("Overwrite", if value { "T" } else { "F" })
    }

    /// Sets an XML request body.
    #[must_use]
    pub fn xml_body(mut self, xml: &str) -> Self {
        self = self.header("Content-Type", "application/xml; charset=utf-8");
        self.body = Some(xml.as_bytes().to_vec());
        self
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://{TEST_HOST}{}", self.path);

        let mut client = match self.method.as_str() {
            "HEAD" => TestClient::head(&url),
            "OPTIONS" => TestClient::options(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that a header exists with the expected value.
    #[must_use]
    pub fn assert_header(self, name: &str, expected: &str) -> Self {
        let value = self.get_header(name);
        assert_eq!(
            value,
            Some(expected),
            "Header '{name}' expected '{expected}' but got {value:?}"
        );
        self
    }

    /// Asserts that a header is absent.
    #[must_use]
    pub fn assert_no_header(self, name: &str) -> Self {
        assert!(
            self.get_header(name).is_none(),
            "Header '{name}' unexpectedly present"
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = self.body_string();
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Asserts that the response body does not contain the specified substring.
    #[must_use]
    pub fn assert_body_not_contains(self, unexpected: &str) -> Self {
        let body = self.body_string();
        assert!(
            !body.contains(unexpected),
            "Expected body to NOT contain '{unexpected}' but got:\n{body}"
        );
        self
    }

    /// Asserts that the response body is empty.
    #[must_use]
    pub fn assert_body_empty(self) -> Self {
        assert!(
            self.body.is_empty(),
            "Expected empty body but got {} bytes",
            self.body.len()
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Counts the number of `<D:response>` elements in a multistatus response.
    #[must_use]
    pub fn count_multistatus_responses(&self) -> usize {
        self.body_string().matches("<D:response>").count()
    }
}
