//! Ordered, application-dependent population of the capability registry.

use crate::apps::ApplicationName;
use crate::backends::BackendProfile;
use crate::registry::capability::{CapabilityRegistry, RegistryError};

/// One registration call against a backend profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    Models,
    Covariances,
    ObsErrors,
    ObsFilters,
    ObsLocalizations,
    Localizations,
}

const UNCONDITIONAL_STEPS: [RegistrationStep; 4] = [
    RegistrationStep::Models,
    RegistrationStep::Covariances,
    RegistrationStep::ObsErrors,
    RegistrationStep::ObsFilters,
];

/// Registration steps for one application, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPlan {
    steps: Vec<RegistrationStep>,
}

impl RegistrationPlan {
    pub fn for_application(application: ApplicationName) -> Self {
        let mut steps = UNCONDITIONAL_STEPS.to_vec();
        match application {
            ApplicationName::LocalEnsembleDa => steps.push(RegistrationStep::ObsLocalizations),
            ApplicationName::Variational => steps.push(RegistrationStep::Localizations),
            ApplicationName::ConvertState
            | ApplicationName::ErrorCovarianceToolbox
            | ApplicationName::HofX4D => {}
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[RegistrationStep] {
        &self.steps
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    pub applied: Vec<RegistrationStep>,
    pub skipped: Vec<RegistrationStep>,
}

/// Runs the registration plan for `application` against `profile`.
///
/// A conflicting rebinding aborts the sequence; factories registered by earlier
/// steps stay in the registry.
pub fn register_capabilities(
    profile: &dyn BackendProfile,
    application: ApplicationName,
    registry: &mut CapabilityRegistry,
) -> Result<RegistrationSummary, RegistryError> {
    let plan = RegistrationPlan::for_application(application);
    let mut summary = RegistrationSummary::default();

    for &step in plan.steps() {
        if step == RegistrationStep::Localizations && !profile.supports_localization() {
            tracing::debug!(
                backend = profile.name(),
                application = %application,
                "backend has no variational localization; skipping"
            );
            summary.skipped.push(step);
            continue;
        }

        let before = registry.len();
        apply_step(profile, step, registry)?;
        tracing::debug!(
            backend = profile.name(),
            step = ?step,
            inserted = registry.len() - before,
            "registered capability factories"
        );
        summary.applied.push(step);
    }

    Ok(summary)
}

pub fn apply_step(
    profile: &dyn BackendProfile,
    step: RegistrationStep,
    registry: &mut CapabilityRegistry,
) -> Result<(), RegistryError> {
    match step {
        RegistrationStep::Models => profile.bind_models(registry),
        RegistrationStep::Covariances => profile.bind_covariances(registry),
        RegistrationStep::ObsErrors => profile.bind_obs_errors(registry),
        RegistrationStep::ObsFilters => profile.bind_obs_filters(registry),
        RegistrationStep::ObsLocalizations => profile.bind_obs_localizations(registry),
        RegistrationStep::Localizations => profile.bind_localizations(registry),
    }
}
