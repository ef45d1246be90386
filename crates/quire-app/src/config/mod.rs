use std::sync::Arc;

use salvo::async_trait;
pub use quire_core::config::*;

use crate::error::{AppError, AppResult};

/// Hoop that makes the loaded [`Settings`] available to every handler.
///
/// ## Summary
/// The settings are wrapped in an `Arc` once at startup; each request gets a
/// cheap clone of that pointer injected into its depot, where
/// [`get_config_from_depot`] finds it.
pub struct ConfigHandler {
    settings: Arc<Settings>,
}

impl ConfigHandler {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// The settings this hoop injects.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    /// ## Side Effects
    /// Injects `Arc<Settings>` into the depot, replacing any earlier value.
    #[tracing::instrument(
        skip(self, _req, depot, _res, _ctrl),
        fields(mount_prefix = %self.settings.dav.mount_prefix)
    )]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.settings));
    }
}

/// ## Summary
/// Retrieves the settings injected by [`ConfigHandler`].
///
/// ## Errors
/// Returns `CoreError::InvariantViolation` if no `ConfigHandler` ran for this request.
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot.obtain::<Arc<Settings>>().cloned().map_err(|_err| {
        tracing::error!("Settings missing from depot; is ConfigHandler hooped?");
        AppError::CoreError(quire_core::error::CoreError::InvariantViolation(
            "Configuration not found in depot",
        ))
    })
}
