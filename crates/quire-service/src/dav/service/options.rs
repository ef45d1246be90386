//! OPTIONS service.

use salvo::http::StatusCode;

use quire_core::config::DavConfig;
use quire_rfc::rfc::dav::core::{DavError, DavResult};

use crate::dav::compat::is_compatibility_case;
use crate::dav::request::DavRequest;
use crate::dav::resource::DavResource;
use crate::dav::response::DavResponse;

/// ## Summary
/// Answers OPTIONS for `resource`.
///
/// Visible resources get `Allow`, `DAV` (`1, 2` when locking is supported)
/// and `MS-Author-Via`. For an anonymous office client probing a resource
/// that really exists the answer is 405: that client treats 401 as fatal and
/// 200 as "anonymous access is always allowed".
///
/// ## Errors
/// `MethodNotAllowed` for the office client case, `NotFound` otherwise when
/// the resource is not visible.
#[tracing::instrument(skip_all, fields(path = %req.path))]
pub async fn options(
    req: &DavRequest,
    resource: &dyn DavResource,
    config: &DavConfig,
) -> DavResult<DavResponse> {
    if resource.exists().await {
        let dav = if resource.supports_locking() { "1, 2" } else { "1" };
        return Ok(DavResponse::new(StatusCode::OK)
            .with_header("Allow", resource.allowed_methods())
            .with_header("DAV", dav)
            .with_header("MS-Author-Via", "DAV"));
    }

    if is_compatibility_case(req, resource, &config.office_user_agent_marker).await {
        tracing::debug!("Anonymous office client probe, answering 405");
        return Err(DavError::MethodNotAllowed);
    }

    tracing::debug!("Resource not visible");
    Err(DavError::NotFound)
}
