//! Capability registry plus the registrar that populates it for a backend and
//! application.

pub mod capability;
pub mod registrar;

pub use capability::{
    BuildCapability, Capability, CapabilityFactory, CapabilityKind, CapabilityRegistry,
    Registration, RegistryError,
};
pub use registrar::{
    apply_step, register_capabilities, RegistrationPlan, RegistrationStep, RegistrationSummary,
};
