use super::sections::{
    build_capabilities, ensure_registered, parse_observers, required, required_str,
    CapabilityRequest, ObserverPlan,
};
use super::ApplicationName;
use crate::registry::{CapabilityKind, CapabilityRegistry};
use crate::runtime::application::{Application, ApplicationFuture, RunContext};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::sync::Arc;

const COST_TYPES: &[&str] = &["3D-Var", "3D-FGAT", "4D-Var", "4D-Ens-Var"];

/// Cost functions that propagate the state through the window need a model.
fn needs_model(cost_type: &str) -> bool {
    matches!(cost_type, "3D-FGAT" | "4D-Var")
}

#[derive(Debug)]
struct VariationalPlan {
    cost_type: String,
    model: Option<CapabilityRequest>,
    covariance: CapabilityRequest,
    localization: Option<CapabilityRequest>,
    observers: Vec<ObserverPlan>,
}

impl VariationalPlan {
    fn background_requests(&self) -> Vec<CapabilityRequest> {
        self.model
            .iter()
            .chain(std::iter::once(&self.covariance))
            .chain(self.localization.iter())
            .cloned()
            .collect()
    }
}

/// Incremental variational analysis.
pub struct Variational {
    backend: &'static str,
    registry: Arc<CapabilityRegistry>,
    plan: Option<VariationalPlan>,
}

impl Variational {
    pub fn new(backend: &'static str, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            backend,
            registry,
            plan: None,
        }
    }

    fn parse(config: &Value) -> Result<VariationalPlan> {
        const PATH: &str = "variational.cost function";
        let cost = required(config, "cost function", "variational")?;

        let cost_type = required_str(cost, "cost type", PATH)?.to_owned();
        if !COST_TYPES.contains(&cost_type.as_str()) {
            bail!(
                "{PATH}: unknown cost type \"{cost_type}\" (expected one of: {})",
                COST_TYPES.join(", ")
            );
        }

        let model = match cost.get("model") {
            Some(section) => Some(CapabilityRequest::from_section(
                CapabilityKind::Model,
                section,
                &format!("{PATH}.model"),
            )?),
            None if needs_model(&cost_type) => {
                bail!("{PATH}: \"model\" is required for {cost_type}")
            }
            None => None,
        };

        let background_error = required(cost, "background error", PATH)?;
        let covariance = CapabilityRequest::from_section(
            CapabilityKind::Covariance,
            background_error,
            &format!("{PATH}.background error"),
        )?;
        let localization = background_error
            .get("localization")
            .map(|section| {
                CapabilityRequest::from_section(
                    CapabilityKind::Localization,
                    section,
                    &format!("{PATH}.background error.localization"),
                )
            })
            .transpose()?;

        let observers = parse_observers(
            required(cost, "observations", PATH)?,
            &format!("{PATH}.observations"),
            false,
        )?;

        Ok(VariationalPlan {
            cost_type,
            model,
            covariance,
            localization,
            observers,
        })
    }
}

impl Application for Variational {
    fn name(&self) -> ApplicationName {
        ApplicationName::Variational
    }

    fn configure(&mut self, config: &Value) -> Result<()> {
        let plan = Self::parse(config)?;
        let background = plan.background_requests();
        ensure_registered(
            &self.registry,
            self.backend,
            background
                .iter()
                .chain(plan.observers.iter().flat_map(|o| o.requests.iter())),
        )?;
        self.plan = Some(plan);
        Ok(())
    }

    fn execute<'a>(&'a mut self, ctx: &'a RunContext) -> ApplicationFuture<'a> {
        Box::pin(async move {
            let plan = self
                .plan
                .as_ref()
                .context("variational executed before configure")?;
            tracing::info!(
                backend = self.backend,
                cost_type = %plan.cost_type,
                localized = plan.localization.is_some(),
                observers = plan.observers.len(),
                "setting up variational cost function"
            );

            let background = build_capabilities(&self.registry, &plan.background_requests(), ctx)
                .await
                .context("background term")?;
            tracing::debug!(capabilities = ?background, "background term ready");

            for observer in &plan.observers {
                build_capabilities(&self.registry, &observer.requests, ctx)
                    .await
                    .with_context(|| format!("observer {}", observer.obs_space))?;
            }
            tracing::info!("variational cost function assembled");
            Ok(())
        })
    }
}
