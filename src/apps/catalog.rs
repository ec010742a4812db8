use super::{
    ApplicationName, ConvertState, ErrorCovarianceToolbox, HofX4D, LocalEnsembleDa, Variational,
};
use crate::registry::CapabilityRegistry;
use crate::runtime::application::Application;
use std::sync::Arc;

/// Maps every [`ApplicationName`] to its run unit for one backend.
///
/// Built per invocation and consumed by the dispatcher; run units read capabilities
/// from the shared, already-populated registry.
pub struct ApplicationCatalog {
    backend: &'static str,
    registry: Arc<CapabilityRegistry>,
}

impl ApplicationCatalog {
    pub fn new(backend: &'static str, registry: Arc<CapabilityRegistry>) -> Self {
        Self { backend, registry }
    }

    pub fn entries(&self) -> &'static [ApplicationName] {
        &ApplicationName::ALL
    }

    pub fn create(&self, name: ApplicationName) -> Box<dyn Application> {
        let registry = Arc::clone(&self.registry);
        match name {
            ApplicationName::ConvertState => Box::new(ConvertState::new(self.backend)),
            ApplicationName::ErrorCovarianceToolbox => {
                Box::new(ErrorCovarianceToolbox::new(self.backend, registry))
            }
            ApplicationName::HofX4D => Box::new(HofX4D::new(self.backend, registry)),
            ApplicationName::LocalEnsembleDa => {
                Box::new(LocalEnsembleDa::new(self.backend, registry))
            }
            ApplicationName::Variational => Box::new(Variational::new(self.backend, registry)),
        }
    }
}
