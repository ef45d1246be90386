//! MOVE method handler for `WebDAV` resources.

use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::context::load_context;
use crate::app::api::dav::response::{write_app_error, write_outcome};
use quire_service::dav::service::{self, TransferMode};

/// ## Summary
/// Handles MOVE requests by delegating to the source resource.
///
/// ## Side Effects
/// Creates or replaces the destination and removes the source.
///
/// ## Errors
/// Returns 423 when the source is locked by someone else and 409 for a
/// shallow `Depth`, in addition to the COPY failures.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "MOVE",
    path = %req.uri().path()
))]
pub async fn r#move(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling MOVE request");

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
        TransferMode::Move,
    )
    .await;
    write_outcome(res, outcome);
}
