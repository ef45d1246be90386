//! URI and path utilities for `WebDAV` hrefs and headers.

mod destination;
mod escape;

pub use destination::{Destination, hosts_match, strip_port, strip_userinfo};
pub use escape::{
    Origin, clean_path, escape_path, http_date, is_within_prefix, unescape, url_format,
};
