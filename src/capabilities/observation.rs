//! Observation-error models and quality-control filters. These do not depend on the
//! model backend, so every profile binds the same set.

use super::Params;
use crate::registry::{BuildCapability, CapabilityKind, CapabilityRegistry, RegistryError};
use anyhow::Result;
use serde_json::Value;

/// Obs error applied when an observer does not configure one.
pub const DEFAULT_OBS_ERROR: &str = "diagonal";

#[derive(Debug)]
pub struct DiagonalObsError {
    params: Params,
}

impl BuildCapability for DiagonalObsError {
    const KIND: CapabilityKind = CapabilityKind::ObsError;
    const NAME: &'static str = DEFAULT_OBS_ERROR;

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug)]
pub struct WithinGroupCovariances {
    params: Params,
}

impl BuildCapability for WithinGroupCovariances {
    const KIND: CapabilityKind = CapabilityKind::ObsError;
    const NAME: &'static str = "within group covariances";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug)]
pub struct DomainCheck {
    params: Params,
}

impl BuildCapability for DomainCheck {
    const KIND: CapabilityKind = CapabilityKind::ObsFilter;
    const NAME: &'static str = "Domain Check";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug)]
pub struct BoundsCheck {
    params: Params,
}

impl BuildCapability for BoundsCheck {
    const KIND: CapabilityKind = CapabilityKind::ObsFilter;
    const NAME: &'static str = "Bounds Check";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug)]
pub struct BackgroundCheck {
    params: Params,
}

impl BuildCapability for BackgroundCheck {
    const KIND: CapabilityKind = CapabilityKind::ObsFilter;
    const NAME: &'static str = "Background Check";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug)]
pub struct GaussianThinning {
    params: Params,
}

impl BuildCapability for GaussianThinning {
    const KIND: CapabilityKind = CapabilityKind::ObsFilter;
    const NAME: &'static str = "Gaussian Thinning";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

#[derive(Debug)]
pub struct PerformAction {
    params: Params,
}

impl BuildCapability for PerformAction {
    const KIND: CapabilityKind = CapabilityKind::ObsFilter;
    const NAME: &'static str = "Perform Action";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
        })
    }
}

pub fn register_obs_errors(registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
    registry.register_type::<DiagonalObsError>()?;
    registry.register_type::<WithinGroupCovariances>()?;
    Ok(())
}

pub fn register_obs_filters(registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
    registry.register_type::<DomainCheck>()?;
    registry.register_type::<BoundsCheck>()?;
    registry.register_type::<BackgroundCheck>()?;
    registry.register_type::<GaussianThinning>()?;
    registry.register_type::<PerformAction>()?;
    Ok(())
}
