//! MPAS unstructured-Voronoi backend.

use super::BackendProfile;
use crate::capabilities::{covariance, localization, model, ModelTraits, Params};
use crate::registry::{BuildCapability, CapabilityKind, CapabilityRegistry, RegistryError};
use anyhow::Result;
use serde_json::Value;
use std::marker::PhantomData;

#[derive(Debug)]
pub struct MpasTraits;

impl ModelTraits for MpasTraits {
    const BACKEND: &'static str = "mpasjedi";
}

#[derive(Debug)]
pub struct MpasModel {
    params: Params,
}

impl BuildCapability for MpasModel {
    const KIND: CapabilityKind = CapabilityKind::Model;
    const NAME: &'static str = "MPAS";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

/// Second-order auto-regressive horizontal taper.
#[derive(Debug)]
pub struct HorizontalSoar<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for HorizontalSoar<B> {
    const KIND: CapabilityKind = CapabilityKind::ObsLocalization;
    const NAME: &'static str = "Horizontal SOAR";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MpasJedi;

impl BackendProfile for MpasJedi {
    fn name(&self) -> &'static str {
        MpasTraits::BACKEND
    }

    fn bind_models(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        model::register_generic_models::<MpasTraits>(registry)?;
        registry.register_type::<MpasModel>()?;
        Ok(())
    }

    fn bind_covariances(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        covariance::register_covariances::<MpasTraits>(registry)
    }

    fn bind_obs_localizations(
        &self,
        registry: &mut CapabilityRegistry,
    ) -> Result<(), RegistryError> {
        localization::register_horizontal_obs_localizations::<MpasTraits>(registry)?;
        registry.register_type::<HorizontalSoar<MpasTraits>>()?;
        Ok(())
    }

    fn supports_localization(&self) -> bool {
        true
    }

    fn bind_localizations(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        localization::register_saber_localizations::<MpasTraits>(registry)
    }
}
