//! PROPFIND method handler for `WebDAV` resources.

use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::context::load_context;
use crate::app::api::dav::response::{write_app_error, write_outcome};
use quire_service::dav::service;

/// ## Summary
/// Handles PROPFIND requests.
///
/// Negotiates the requested properties from the body (empty body = allprop),
/// walks the resource to the requested depth, and answers with a multistatus.
///
/// ## Side Effects
/// - Reads the request body
/// - Returns 207 Multi-Status XML response
///
/// ## Errors
/// Returns 400 for malformed bodies, 404 for hidden resources, and 405 outside
/// the mount prefix.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "PROPFIND",
    path = %req.uri().path()
))]
pub async fn propfind(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling PROPFIND request");

    let ctx = match load_context(req, depot, true).await {
        Ok(ctx) => ctx,
        Err(e) => {
            write_app_error(res, &e);
            return;
        }
    };

    let outcome = service::propfind(&ctx.request, ctx.resource.as_ref(), &ctx.settings.dav).await;
    write_outcome(res, outcome);
}
