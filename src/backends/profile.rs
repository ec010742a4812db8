use crate::capabilities::observation;
use crate::registry::{CapabilityRegistry, RegistryError};
use std::sync::Arc;

/// Binds one model backend's capability factories into a registry.
///
/// Observation errors and filters are shared by every backend, so those binds have
/// default implementations.
pub trait BackendProfile: Send + Sync {
    /// Canonical lowercase identifier used on the command line.
    fn name(&self) -> &'static str;

    fn bind_models(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError>;

    fn bind_covariances(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError>;

    fn bind_obs_errors(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        observation::register_obs_errors(registry)
    }

    fn bind_obs_filters(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        observation::register_obs_filters(registry)
    }

    fn bind_obs_localizations(
        &self,
        registry: &mut CapabilityRegistry,
    ) -> Result<(), RegistryError>;

    /// Whether the backend provides model-space localization for variational DA.
    fn supports_localization(&self) -> bool {
        false
    }

    fn bind_localizations(&self, _registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Closed set of profiles a multi-backend executable accepts.
#[derive(Clone, Default)]
pub struct BackendCatalog {
    profiles: Vec<Arc<dyn BackendProfile>>,
}

impl BackendCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every backend compiled into this crate.
    pub fn standard() -> Self {
        Self::new()
            .with(Arc::new(super::Fv3Jedi))
            .with(Arc::new(super::MpasJedi))
    }

    pub fn with(mut self, profile: Arc<dyn BackendProfile>) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Exact match on the canonical identifier; callers fold case first.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn BackendProfile>> {
        self.profiles
            .iter()
            .find(|profile| profile.name() == name)
            .cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.profiles.iter().map(|profile| profile.name()).collect()
    }
}

impl std::fmt::Debug for BackendCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCatalog")
            .field("profiles", &self.names())
            .finish()
    }
}
