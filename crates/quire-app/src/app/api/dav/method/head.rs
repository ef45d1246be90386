//! HEAD method handler.

use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::context::load_context;
use crate::app::api::dav::response::{write_app_error, write_outcome};
use quire_service::dav::service;

/// ## Summary
/// Handles HEAD requests with entity metadata and no body.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn head(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling HEAD request");

    let ctx = match load_context(req, depot, false).await {
        Ok(ctx) => ctx,
        Err(e) => {
            write_app_error(res, &e);
            return;
        }
    };

    let outcome = service::head(&ctx.request, ctx.resource.as_ref(), &ctx.settings.dav).await;
    write_outcome(res, outcome);
}
