use super::sections::{build_capabilities, ensure_registered, parse_observers, required, ObserverPlan};
use super::ApplicationName;
use crate::registry::{CapabilityKind, CapabilityRegistry};
use crate::runtime::application::{Application, ApplicationFuture, RunContext};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::sync::Arc;

const SOLVERS: &[&str] = &["LETKF", "GETKF"];
const DEFAULT_SOLVER: &str = "LETKF";

#[derive(Debug)]
struct LocalEnsemblePlan {
    solver: String,
    observers: Vec<ObserverPlan>,
}

/// Local ensemble transform filter; every observer must carry observation-space
/// localization.
pub struct LocalEnsembleDa {
    backend: &'static str,
    registry: Arc<CapabilityRegistry>,
    plan: Option<LocalEnsemblePlan>,
}

impl LocalEnsembleDa {
    pub fn new(backend: &'static str, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            backend,
            registry,
            plan: None,
        }
    }
}

fn solver_name(config: &Value) -> Result<String> {
    let solver = match config.get("local ensemble DA") {
        None => DEFAULT_SOLVER,
        Some(section) => match section.get("solver") {
            None => DEFAULT_SOLVER,
            Some(Value::String(solver)) => solver.as_str(),
            Some(_) => bail!("localensembleda.local ensemble DA: \"solver\" must be a string"),
        },
    };
    if !SOLVERS.contains(&solver) {
        bail!(
            "unknown local ensemble solver \"{solver}\" (expected one of: {})",
            SOLVERS.join(", ")
        );
    }
    Ok(solver.to_owned())
}

impl Application for LocalEnsembleDa {
    fn name(&self) -> ApplicationName {
        ApplicationName::LocalEnsembleDa
    }

    fn configure(&mut self, config: &Value) -> Result<()> {
        let solver = solver_name(config)?;
        let observers = parse_observers(
            required(config, "observations", "localensembleda")?,
            "localensembleda.observations",
            true,
        )?;
        ensure_registered(
            &self.registry,
            self.backend,
            observers.iter().flat_map(|o| o.requests.iter()),
        )?;
        self.plan = Some(LocalEnsemblePlan { solver, observers });
        Ok(())
    }

    fn execute<'a>(&'a mut self, ctx: &'a RunContext) -> ApplicationFuture<'a> {
        Box::pin(async move {
            let plan = self
                .plan
                .as_ref()
                .context("localensembleda executed before configure")?;
            tracing::info!(
                backend = self.backend,
                solver = %plan.solver,
                observers = plan.observers.len(),
                "starting local ensemble analysis"
            );
            for observer in &plan.observers {
                build_capabilities(&self.registry, &observer.requests, ctx)
                    .await
                    .with_context(|| format!("observer {}", observer.obs_space))?;
                tracing::info!(
                    obs_space = %observer.obs_space,
                    localizations = observer.count(CapabilityKind::ObsLocalization),
                    "observer localized"
                );
            }
            Ok(())
        })
    }
}
