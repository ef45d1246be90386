//! HEAD service.

use salvo::http::StatusCode;

use quire_core::config::DavConfig;
use quire_rfc::rfc::dav::core::{DavError, DavResult};
use quire_rfc::rfc::uri::http_date;

use crate::dav::compat::is_compatibility_case;
use crate::dav::request::DavRequest;
use crate::dav::resource::DavResource;
use crate::dav::response::DavResponse;

/// ## Summary
/// Answers HEAD for `resource` with its entity headers.
///
/// An anonymous office client probing a resource that really exists gets the
/// same 200 response, built straight from the resource metadata without
/// re-checking visibility.
///
/// ## Errors
/// `NotFound` when the resource is not visible and the office client case
/// does not apply.
#[tracing::instrument(skip_all, fields(path = %req.path))]
pub async fn head(
    req: &DavRequest,
    resource: &dyn DavResource,
    config: &DavConfig,
) -> DavResult<DavResponse> {
    if resource.exists().await {
        return Ok(entity_headers(resource).await);
    }

    if is_compatibility_case(req, resource, &config.office_user_agent_marker).await {
        tracing::debug!("Anonymous office client probe, answering with metadata");
        return Ok(entity_headers(resource).await);
    }

    tracing::debug!("Resource not visible");
    Err(DavError::NotFound)
}

/// `200 OK` with `ETag`, `Content-Type` and `Last-Modified` for whichever
/// of them the resource has.
async fn entity_headers(resource: &dyn DavResource) -> DavResponse {
    let mut res = DavResponse::new(StatusCode::OK);
    if let Some(etag) = resource.etag().await {
        res = res.with_header("ETag", etag);
    }
    if let Some(content_type) = resource.content_type().await {
        res = res.with_header("Content-Type", content_type);
    }
    if let Some(modified) = resource.last_modified().await {
        res = res.with_header("Last-Modified", http_date(&modified));
    }
    res
}
