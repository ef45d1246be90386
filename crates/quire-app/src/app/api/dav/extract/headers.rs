use salvo::Request;

use quire_rfc::rfc::dav::core::Depth;
use quire_service::dav::request::parse_overwrite;

fn header_str<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|h| h.to_str().ok())
}

/// ## Summary
/// Parses the `Depth` header, `None` when absent.
///
/// Unrecognized values are read as `infinity`.
#[must_use]
pub fn parse_depth(req: &Request) -> Option<Depth> {
    header_str(req, "Depth").map(Depth::from_header)
}

/// Returns the raw `Destination` header.
#[must_use]
pub fn parse_destination(req: &Request) -> Option<String> {
    header_str(req, "Destination")
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(ToString::to_string)
}

/// Returns `false` only for `Overwrite: F`.
#[must_use]
pub fn parse_overwrite_header(req: &Request) -> bool {
    parse_overwrite(header_str(req, "Overwrite"))
}

#[must_use]
pub fn parse_user_agent(req: &Request) -> Option<String> {
    header_str(req, "User-Agent").map(ToString::to_string)
}
