use super::{ModelTraits, Params};
use crate::registry::{BuildCapability, CapabilityKind, CapabilityRegistry, RegistryError};
use anyhow::Result;
use serde_json::Value;
use std::marker::PhantomData;

/// Block-chain covariance assembled by SABER.
#[derive(Debug)]
pub struct SaberCovariance<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for SaberCovariance<B> {
    const KIND: CapabilityKind = CapabilityKind::Covariance;
    const NAME: &'static str = "SABER";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Covariance estimated from an ensemble of states.
#[derive(Debug)]
pub struct EnsembleCovariance<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for EnsembleCovariance<B> {
    const KIND: CapabilityKind = CapabilityKind::Covariance;
    const NAME: &'static str = "ensemble";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Weighted sum of other covariance models.
#[derive(Debug)]
pub struct HybridCovariance<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for HybridCovariance<B> {
    const KIND: CapabilityKind = CapabilityKind::Covariance;
    const NAME: &'static str = "hybrid";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Covariance factories for backend `B`.
pub fn register_covariances<B: ModelTraits>(
    registry: &mut CapabilityRegistry,
) -> Result<(), RegistryError> {
    registry.register_type::<SaberCovariance<B>>()?;
    registry.register_type::<EnsembleCovariance<B>>()?;
    registry.register_type::<HybridCovariance<B>>()?;
    Ok(())
}
