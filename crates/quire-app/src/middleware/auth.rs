use salvo::Depot;
use tracing::error;

use crate::config::{AuthMethod, Settings, get_config_from_depot};
use quire_core::types::Identity;
use quire_service::auth::depot_keys;

pub struct IdentityMiddleware;

/// ## Summary
/// Establishes the caller identity from the configured authentication method and
/// stores it in the depot.
///
/// Requests without usable credentials run as [`Identity::Anonymous`]; access
/// decisions are left to the resources.
///
/// ## Side Effects
/// Inserts the identity into the depot under `depot_keys::IDENTITY`.
///
/// ## Errors
/// Returns an HTTP 500 response if the configuration is missing from the depot.
#[salvo::async_trait]
impl salvo::Handler for IdentityMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        let identity = resolve_identity(req, &config);
        tracing::debug!(identity = %identity, "Identity established");
        depot.insert(depot_keys::IDENTITY, identity);
    }
}

/// Maps the request to an identity according to `settings.auth`.
#[must_use]
pub fn resolve_identity(req: &salvo::Request, settings: &Settings) -> Identity {
    match settings.auth.method {
        AuthMethod::Anonymous => Identity::Anonymous,
        AuthMethod::SingleUser => match &settings.auth.single_user {
            Some(single) => Identity::user(single.name.clone()),
            None => {
                tracing::warn!("single_user auth configured without a user name");
                Identity::Anonymous
            }
        },
        AuthMethod::Proxy => {
            let header = settings
                .auth
                .proxy
                .as_ref()
                .map_or(quire_core::constants::DEFAULT_PROXY_USER_HEADER, |p| {
                    p.header.as_str()
                });
            req.headers()
                .get(header)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map_or(Identity::Anonymous, Identity::user)
        }
    }
}
