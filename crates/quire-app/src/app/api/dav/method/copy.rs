//! COPY method handler for `WebDAV` resources.

use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::context::load_context;
use crate::app::api::dav::response::{write_app_error, write_outcome};
use quire_service::dav::service::{self, TransferMode};

/// ## Summary
/// Handles COPY requests by delegating to the source resource.
///
/// ## Side Effects
/// Creates or replaces the resource named by the `Destination` header.
///
/// ## Errors
/// Returns 400 without a `Destination`, 403 when copying onto itself, 502 for a
/// foreign destination host, and whatever status the backend reports.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "COPY",
    path = %req.uri().path()
))]
pub async fn copy(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling COPY request");

    let ctx = match load_context(req, depot, false).await {
        Ok(ctx) => ctx,
        Err(e) => {
            write_app_error(res, &e);
            return;
        }
    };

    let outcome = service::move_or_copy(
        &ctx.request,
        ctx.resource.as_ref(),
        ctx.factory.as_ref(),
        &ctx.settings.dav,
        TransferMode::Copy,
    )
    .await;
    write_outcome(res, outcome);
}
