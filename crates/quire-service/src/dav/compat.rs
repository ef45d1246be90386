//! Office client compatibility predicate.
//!
//! The office suite probes resources anonymously before authenticating. A
//! strict 404 makes it give up, so for that client alone OPTIONS and HEAD
//! answer as if the resource were reachable. Every other anonymous caller
//! still sees 404.

use super::request::DavRequest;
use super::resource::DavResource;

/// Returns whether the workaround applies to this request and resource.
///
/// Holds when the resource really exists, the `User-Agent` contains `marker`
/// (ignoring case), and the caller is anonymous.
pub async fn is_compatibility_case(
    req: &DavRequest,
    resource: &dyn DavResource,
    marker: &str,
) -> bool {
    if !req.identity.is_anonymous() || marker.is_empty() {
        return false;
    }

    let Some(user_agent) = req.user_agent.as_deref() else {
        return false;
    };

    if !user_agent
        .to_lowercase()
        .contains(&marker.to_lowercase())
    {
        return false;
    }

    resource.really_exists().await
}
