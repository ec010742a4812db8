//! FV3 cubed-sphere backend.

use super::BackendProfile;
use crate::capabilities::{covariance, localization, model, ModelTraits, Params};
use crate::registry::{BuildCapability, CapabilityKind, CapabilityRegistry, RegistryError};
use anyhow::Result;
use serde_json::Value;

#[derive(Debug)]
pub struct Fv3Traits;

impl ModelTraits for Fv3Traits {
    const BACKEND: &'static str = "fv3jedi";
}

/// FV3 dynamical core run in-process as the forecast model.
#[derive(Debug)]
pub struct Fv3Model {
    params: Params,
}

impl BuildCapability for Fv3Model {
    const KIND: CapabilityKind = CapabilityKind::Model;
    const NAME: &'static str = "FV3LM";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug)]
pub struct Fv3VerticalLocalization {
    params: Params,
}

impl BuildCapability for Fv3VerticalLocalization {
    const KIND: CapabilityKind = CapabilityKind::ObsLocalization;
    const NAME: &'static str = "Vertical localization";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fv3Jedi;

impl BackendProfile for Fv3Jedi {
    fn name(&self) -> &'static str {
        Fv3Traits::BACKEND
    }

    fn bind_models(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        model::register_generic_models::<Fv3Traits>(registry)?;
        registry.register_type::<Fv3Model>()?;
        Ok(())
    }

    fn bind_covariances(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        covariance::register_covariances::<Fv3Traits>(registry)
    }

    fn bind_obs_localizations(
        &self,
        registry: &mut CapabilityRegistry,
    ) -> Result<(), RegistryError> {
        localization::register_horizontal_obs_localizations::<Fv3Traits>(registry)?;
        registry.register_type::<Fv3VerticalLocalization>()?;
        Ok(())
    }
}
