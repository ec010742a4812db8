//! Configuration sections shared by several applications and the helpers that turn
//! them into registry requests.

use crate::capabilities::observation::DEFAULT_OBS_ERROR;
use crate::registry::{Capability, CapabilityKind, CapabilityRegistry};
use crate::runtime::application::RunContext;
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

/// A capability an application needs, selected by name from its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityRequest {
    pub kind: CapabilityKind,
    pub name: String,
    pub params: Value,
}

impl CapabilityRequest {
    /// Reads the selector key for `kind` out of `section`; the whole section becomes the
    /// capability parameters.
    pub fn from_section(kind: CapabilityKind, section: &Value, path: &str) -> Result<Self> {
        let key = kind.selector_key();
        let name = section
            .get(key)
            .and_then(Value::as_str)
            .with_context(|| format!("{path}: \"{key}\" is required"))?;
        if name.trim().is_empty() {
            bail!("{path}: \"{key}\" cannot be empty");
        }
        Ok(Self {
            kind,
            name: name.to_owned(),
            params: section.clone(),
        })
    }
}

/// Observer configuration: one observation space plus its error model, filters and
/// localizations.
#[derive(Debug, Clone)]
pub struct ObserverPlan {
    pub obs_space: String,
    pub requests: Vec<CapabilityRequest>,
}

impl ObserverPlan {
    pub fn count(&self, kind: CapabilityKind) -> usize {
        self.requests.iter().filter(|r| r.kind == kind).count()
    }
}

/// Fetches `config[key]`, failing with the dotted path when absent.
pub fn required<'a>(config: &'a Value, key: &str, path: &str) -> Result<&'a Value> {
    config
        .get(key)
        .with_context(|| format!("{path}: \"{key}\" is required"))
}

pub fn required_str<'a>(config: &'a Value, key: &str, path: &str) -> Result<&'a str> {
    required(config, key, path)?
        .as_str()
        .with_context(|| format!("{path}: \"{key}\" must be a string"))
}

fn optional_array<'a>(section: &'a Value, key: &str, path: &str) -> Result<&'a [Value]> {
    match section.get(key) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => bail!("{path}: \"{key}\" must be an array"),
    }
}

/// Parses `observations.observers`.
pub fn parse_observers(
    observations: &Value,
    path: &str,
    require_localizations: bool,
) -> Result<Vec<ObserverPlan>> {
    let observers = optional_array(observations, "observers", path)?;
    if observers.is_empty() {
        bail!("{path}: \"observers\" must list at least one observer");
    }

    observers
        .iter()
        .enumerate()
        .map(|(index, observer)| {
            parse_observer(
                observer,
                &format!("{path}.observers[{index}]"),
                require_localizations,
            )
        })
        .collect()
}

fn parse_observer(observer: &Value, path: &str, require_localizations: bool) -> Result<ObserverPlan> {
    let obs_space = required_str(
        required(observer, "obs space", path)?,
        "name",
        &format!("{path}.obs space"),
    )?
    .to_owned();

    let mut requests = Vec::new();
    let default_error = json!({ "covariance model": DEFAULT_OBS_ERROR });
    let error = observer.get("obs error").unwrap_or(&default_error);
    requests.push(CapabilityRequest::from_section(
        CapabilityKind::ObsError,
        error,
        &format!("{path}.obs error"),
    )?);

    for (index, filter) in optional_array(observer, "obs filters", path)?
        .iter()
        .enumerate()
    {
        requests.push(CapabilityRequest::from_section(
            CapabilityKind::ObsFilter,
            filter,
            &format!("{path}.obs filters[{index}]"),
        )?);
    }

    let localizations = optional_array(observer, "obs localizations", path)?;
    if require_localizations && localizations.is_empty() {
        bail!("{path}: \"obs localizations\" must list at least one localization");
    }
    for (index, loc) in localizations.iter().enumerate() {
        requests.push(CapabilityRequest::from_section(
            CapabilityKind::ObsLocalization,
            loc,
            &format!("{path}.obs localizations[{index}]"),
        )?);
    }

    Ok(ObserverPlan {
        obs_space,
        requests,
    })
}

/// Fails unless every request names a factory present in the registry.
pub fn ensure_registered<'a>(
    registry: &CapabilityRegistry,
    backend: &str,
    requests: impl IntoIterator<Item = &'a CapabilityRequest>,
) -> Result<()> {
    for request in requests {
        if !registry.contains(request.kind, &request.name) {
            let available = registry.names(request.kind);
            bail!(
                "{} \"{}\" is not available for backend {backend} (available: {})",
                request.kind,
                request.name,
                if available.is_empty() {
                    "none".to_owned()
                } else {
                    available.join(", ")
                }
            );
        }
    }
    Ok(())
}

/// Builds every requested capability, yielding between builds so shutdown can
/// interrupt long request lists.
pub async fn build_capabilities(
    registry: &CapabilityRegistry,
    requests: &[CapabilityRequest],
    ctx: &RunContext,
) -> Result<Vec<Box<dyn Capability>>> {
    let mut built = Vec::with_capacity(requests.len());
    for request in requests {
        if ctx.is_cancelled() {
            bail!("execution cancelled");
        }

        match registry.build(request.kind, &request.name, &request.params) {
            Ok(capability) => {
                ctx.telemetry().record_capability_built();
                tracing::debug!(kind = %request.kind, name = %request.name, "built capability");
                built.push(capability);
            }
            Err(err) => {
                ctx.telemetry().record_capability_failure();
                return Err(err);
            }
        }
        tokio::task::yield_now().await;
    }
    Ok(built)
}
