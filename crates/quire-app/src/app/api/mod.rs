pub mod dav;

use salvo::Router;

use crate::middleware::auth::IdentityMiddleware;

pub use quire_core::constants::{DAV_ROUTE_COMPONENT, DAV_ROUTE_PREFIX};

/// ## Summary
/// Constructs the main router with the `WebDAV` method handlers.
///
/// Every path is routed to the handlers; paths outside the mount prefix are
/// rejected by the handlers themselves.
///
/// ## Errors
/// Returns an error if any child route fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::new().hoop(IdentityMiddleware).push(dav::routes()?))
}
