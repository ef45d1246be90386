//! MOVE and COPY service.

use salvo::http::StatusCode;

use quire_core::config::DavConfig;
use quire_rfc::rfc::dav::build::serialize_multistatus;
use quire_rfc::rfc::dav::core::{DavError, DavResult, Multistatus, PropstatResponse, Status};
use quire_rfc::rfc::uri::{Destination, clean_path, hosts_match, url_format};

use crate::dav::request::DavRequest;
use crate::dav::resource::{DavResource, ResourceFactory};
use crate::dav::response::DavResponse;

/// Whether the source survives the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

impl TransferMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::Move => "MOVE",
        }
    }
}

/// ## Summary
/// Copies or moves `resource` to the request's `Destination`.
///
/// The destination is resolved under the source's identity. A created
/// destination is reported in `Location`. Collections always answer with a
/// single-entry multistatus carrying the outcome; other resources answer
/// with the raw status.
///
/// ## Side Effects
/// Delegates the copy or move to the resource.
///
/// ## Errors
/// - `NotFound` when the source is not visible.
/// - `LockConflict` when a move is blocked by someone else's lock.
/// - `MissingDestination` without a `Destination` header.
/// - `BadGateway` when the destination host is missing or differs from the request host.
/// - `Forbidden` when the destination is the source itself.
/// - `Conflict` for a move with `Depth` 0 or 1.
#[tracing::instrument(skip_all, fields(method = mode.as_str(), path = %req.path))]
pub async fn move_or_copy(
    req: &DavRequest,
    resource: &dyn DavResource,
    factory: &dyn ResourceFactory,
    config: &DavConfig,
    mode: TransferMode,
) -> DavResult<DavResponse> {
    if !resource.exists().await {
        tracing::debug!("Resource not visible");
        return Err(DavError::NotFound);
    }

    if mode == TransferMode::Move && resource.supports_locking() {
        resource.lock_check().await.map_err(|status| {
            tracing::debug!(%status, "Move blocked by lock");
            DavError::LockConflict(status.as_u16())
        })?;
    }

    let raw = req.destination.as_deref().ok_or_else(|| {
        tracing::debug!("Missing Destination header");
        DavError::MissingDestination
    })?;
    let destination = Destination::parse(raw);

    match destination.host.as_deref() {
        Some(host) if hosts_match(host, &req.origin.host) => {}
        host => {
            tracing::debug!(destination_host = ?host, request_host = %req.origin.host, "Destination host mismatch");
            return Err(DavError::BadGateway);
        }
    }

    let public_path = resource.public_path();
    if same_path(&destination.path, &public_path) {
        tracing::debug!("Destination is the source itself");
        return Err(DavError::Forbidden);
    }

    let dest_clean = clean_path(&destination.path, config.normalized_prefix());
    let dest = factory
        .resolve(&destination.path, &dest_clean, resource.identity())
        .await;

    let status = match mode {
        TransferMode::Copy => resource.copy_to(dest.as_ref(), req.overwrite).await,
        TransferMode::Move => {
            if let Some(depth) = req.depth
                && !depth.is_deep()
            {
                tracing::debug!(%depth, "Partial-depth move refused");
                return Err(DavError::Conflict(format!("cannot move with depth {depth}")));
            }
            resource.move_to(dest.as_ref(), req.overwrite).await
        }
    };

    tracing::info!(%status, destination = %destination.path, "Transfer finished");

    let is_collection = resource.is_collection().await;
    let dest_url = req
        .origin
        .absolute_href(&url_format(&destination.path, is_collection));

    let mut res = DavResponse::new(status);
    if status == StatusCode::CREATED {
        res = res.with_header("Location", dest_url.clone());
    }

    if !is_collection {
        return Ok(res);
    }

    let href = if status == StatusCode::CREATED {
        dest_url
    } else {
        req.origin.absolute_href(&url_format(&public_path, true))
    };
    let mut multistatus = Multistatus::new().with_http_version(req.http_version.clone());
    multistatus.add_response(PropstatResponse::status(href, Status::from(status.as_u16())));
    let xml = serialize_multistatus(&multistatus).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize multistatus");
        DavError::from(e)
    })?;

    let mut multi = DavResponse::multistatus(xml);
    multi.headers.extend(res.headers);
    Ok(multi)
}

fn same_path(a: &str, b: &str) -> bool {
    let a = a.trim_end_matches('/');
    let b = b.trim_end_matches('/');
    a == b
}
