use super::{ModelTraits, Params};
use crate::registry::{BuildCapability, CapabilityKind, CapabilityRegistry, RegistryError};
use anyhow::Result;
use serde_json::Value;
use std::marker::PhantomData;

/// Compactly supported fifth-order taper on horizontal distance.
#[derive(Debug)]
pub struct HorizontalGaspariCohn<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for HorizontalGaspariCohn<B> {
    const KIND: CapabilityKind = CapabilityKind::ObsLocalization;
    const NAME: &'static str = "Horizontal Gaspari-Cohn";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Unit weight inside the lengthscale, zero outside.
#[derive(Debug)]
pub struct HorizontalBoxCar<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for HorizontalBoxCar<B> {
    const KIND: CapabilityKind = CapabilityKind::ObsLocalization;
    const NAME: &'static str = "Horizontal Box car";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Model-space localization for hybrid and ensemble variational solvers.
#[derive(Debug)]
pub struct SaberLocalization<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for SaberLocalization<B> {
    const KIND: CapabilityKind = CapabilityKind::Localization;
    const NAME: &'static str = "SABER";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Horizontal observation localizations every backend can use.
pub fn register_horizontal_obs_localizations<B: ModelTraits>(
    registry: &mut CapabilityRegistry,
) -> Result<(), RegistryError> {
    registry.register_type::<HorizontalGaspariCohn<B>>()?;
    registry.register_type::<HorizontalBoxCar<B>>()?;
    Ok(())
}

pub fn register_saber_localizations<B: ModelTraits>(
    registry: &mut CapabilityRegistry,
) -> Result<(), RegistryError> {
    registry.register_type::<SaberLocalization<B>>()?;
    Ok(())
}
