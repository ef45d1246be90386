//! PROPFIND service.

use quire_core::config::DavConfig;
use quire_rfc::rfc::dav::build::serialize_multistatus;
use quire_rfc::rfc::dav::core::{DavError, DavResult, Depth, Multistatus};
use quire_rfc::rfc::dav::parse::negotiate_properties;
use quire_rfc::rfc::uri::is_within_prefix;

use crate::dav::properties::propstat_response;
use crate::dav::request::DavRequest;
use crate::dav::resource::DavResource;
use crate::dav::response::DavResponse;
use crate::dav::traversal::descendants;

/// ## Summary
/// Answers PROPFIND for `resource` and its descendants within the request depth.
///
/// The property set is negotiated once from the body. Each listed resource
/// gets one response entry with its href and property block, in pre-order.
/// A missing `Depth` header means infinity.
///
/// ## Errors
/// `MethodNotAllowed` when the resource lies outside the mount prefix,
/// `NotFound` when it is not visible, and `BadRequest` or
/// `MalformedNamespace` when the body cannot be negotiated.
#[tracing::instrument(skip_all, fields(path = %req.path, depth = ?req.depth))]
pub async fn propfind(
    req: &DavRequest,
    resource: &dyn DavResource,
    config: &DavConfig,
) -> DavResult<DavResponse> {
    let public_path = resource.public_path();
    if !is_within_prefix(&public_path, config.normalized_prefix()) {
        tracing::debug!(public_path = %public_path, "PROPFIND outside mount prefix");
        return Err(DavError::MethodNotAllowed);
    }

    if !resource.exists().await {
        tracing::debug!("Resource not visible");
        return Err(DavError::NotFound);
    }

    let selection = negotiate_properties(&req.body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting PROPFIND body");
        DavError::from(e)
    })?;

    let depth = req.depth.unwrap_or(Depth::Infinity);
    let mut multistatus = Multistatus::new().with_http_version(req.http_version.clone());
    multistatus.add_response(propstat_response(resource, &selection, &req.origin).await);
    for descendant in descendants(resource, depth).await {
        multistatus
            .add_response(propstat_response(descendant.as_ref(), &selection, &req.origin).await);
    }

    tracing::debug!(responses = multistatus.responses.len(), "PROPFIND multistatus built");

    let xml = serialize_multistatus(&multistatus).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize multistatus");
        DavError::from(e)
    })?;

    Ok(DavResponse::multistatus(xml))
}
