use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use quire_core::error::CoreError;
use quire_service::dav::ResourceFactory;

pub struct ResourceFactoryHandler<T: ResourceFactory + Clone> {
    pub factory: T,
}

#[async_trait]
impl<T: ResourceFactory + Clone + 'static> salvo::Handler for ResourceFactoryHandler<T> {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let factory: Arc<dyn ResourceFactory> = Arc::new(self.factory.clone());
        depot.inject(factory);
    }
}

/// ## Summary
/// Retrieves the resource factory from the depot.
///
/// ## Errors
/// Returns an error if no resource factory was injected.
pub fn get_factory_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn ResourceFactory>> {
    depot
        .obtain::<Arc<dyn ResourceFactory>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Resource factory not found in depot").into())
}
