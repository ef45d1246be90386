use std::sync::Arc;

use salvo::{Depot, Request};

use crate::app::api::dav::extract::headers::{
    parse_depth, parse_destination, parse_overwrite_header, parse_user_agent,
};
use crate::app::api::dav::util::{http_version, request_origin};
use crate::config::{Settings, get_config_from_depot};
use crate::error::{AppError, AppResult};
use crate::resource_handler::get_factory_from_depot;
use quire_rfc::rfc::uri::{clean_path, unescape};
use quire_service::auth::get_identity_from_depot;
use quire_service::dav::{DavRequest, DavResource, ResourceFactory};

/// Everything a method handler needs to call into the service layer.
pub struct DavContext {
    pub request: DavRequest,
    pub resource: Box<dyn DavResource>,
    pub factory: Arc<dyn ResourceFactory>,
    pub settings: Arc<Settings>,
}

/// ## Summary
/// Builds the transport-neutral request and resolves its target resource.
///
/// The request body is only read when `with_body` is set.
///
/// ## Errors
/// Returns an error if the configuration or resource factory is missing from
/// the depot, or the body cannot be read.
pub async fn load_context(
    req: &mut Request,
    depot: &Depot,
    with_body: bool,
) -> AppResult<DavContext> {
    let settings = get_config_from_depot(depot)?;
    let factory = get_factory_from_depot(depot)?;
    let identity = get_identity_from_depot(depot);

    let path = unescape(req.uri().path());
    let mut request = DavRequest::new(req.method().as_str(), path)
        .with_overwrite(parse_overwrite_header(req))
        .with_origin(request_origin(req, depot))
        .with_identity(identity);
    request.http_version = http_version(req).to_string();
    request.depth = parse_depth(req);
    request.destination = parse_destination(req);
    request.user_agent = parse_user_agent(req);

    if with_body {
        let body = req
            .payload()
            .await
            .map_err(|e| AppError::BodyRead(e.to_string()))?;
        tracing::debug!(bytes = body.len(), "Request body read");
        request.body = body.to_vec();
    }

    let clean = clean_path(&request.path, settings.dav.normalized_prefix());
    let resource = factory
        .resolve(&request.path, &clean, &request.identity)
        .await;

    Ok(DavContext {
        request,
        resource,
        factory,
        settings,
    })
}
