use super::{ModelTraits, Params};
use crate::registry::{BuildCapability, CapabilityKind, CapabilityRegistry, RegistryError};
use anyhow::Result;
use serde_json::Value;
use std::marker::PhantomData;

/// Replays states read from files instead of integrating a model.
#[derive(Debug)]
pub struct PseudoModel<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for PseudoModel<B> {
    const KIND: CapabilityKind = CapabilityKind::Model;
    const NAME: &'static str = "PSEUDO";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Leaves the state unchanged over each time step.
#[derive(Debug)]
pub struct IdentityModel<B> {
    params: Params,
    _traits: PhantomData<B>,
}

impl<B: ModelTraits> BuildCapability for IdentityModel<B> {
    const KIND: CapabilityKind = CapabilityKind::Model;
    const NAME: &'static str = "Identity";

    fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            params: Params::new(params)?,
            _traits: PhantomData,
        })
    }
}

/// Model factories every backend provides.
pub fn register_generic_models<B: ModelTraits>(
    registry: &mut CapabilityRegistry,
) -> Result<(), RegistryError> {
    registry.register_type::<PseudoModel<B>>()?;
    registry.register_type::<IdentityModel<B>>()?;
    Ok(())
}
