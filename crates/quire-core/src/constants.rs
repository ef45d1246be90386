/// Route component constants shared across crates
pub const DAV_ROUTE_COMPONENT: &str = "dav";
pub const DAV_ROUTE_PREFIX: &str = const_str::concat!("/", DAV_ROUTE_COMPONENT);

/// Lowercased `User-Agent` fragment sent by Microsoft Office clients.
pub const OFFICE_USER_AGENT_MARKER: &str = "microsoft office";

/// Header carrying the authenticated user when running behind an auth proxy.
pub const DEFAULT_PROXY_USER_HEADER: &str = "X-Remote-User";

/// HTTP version used in multistatus status lines when the request does not say otherwise.
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";
