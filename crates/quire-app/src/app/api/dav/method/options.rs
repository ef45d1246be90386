//! OPTIONS method handler for `WebDAV` resources.

use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::context::load_context;
use crate::app::api::dav::response::{write_app_error, write_outcome};
use quire_service::dav::service;

/// ## Summary
/// Handles OPTIONS requests.
///
/// Visible resources advertise their `Allow` and `DAV` headers. Anonymous
/// Microsoft Office probes of hidden resources get 405 so the client retries
/// with credentials; everything else gets 404.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn options(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling OPTIONS request");

    let ctx = match load_context(req, depot, false).await {
        Ok(ctx) => ctx,
        Err(e) => {
            write_app_error(res, &e);
            return;
        }
    };

    let outcome = service::options(&ctx.request, ctx.resource.as_ref(), &ctx.settings.dav).await;
    write_outcome(res, outcome);
}
