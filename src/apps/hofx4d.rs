use super::sections::{
    build_capabilities, ensure_registered, parse_observers, required, required_str,
    CapabilityRequest, ObserverPlan,
};
use super::ApplicationName;
use crate::capabilities::check_duration;
use crate::registry::{CapabilityKind, CapabilityRegistry};
use crate::runtime::application::{Application, ApplicationFuture, RunContext};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug)]
struct HofXPlan {
    window_begin: DateTime<FixedOffset>,
    window_length: String,
    model: CapabilityRequest,
    observers: Vec<ObserverPlan>,
}

/// Runs the forecast model over the assimilation window and applies the observation
/// operators and filters along the way.
pub struct HofX4D {
    backend: &'static str,
    registry: Arc<CapabilityRegistry>,
    plan: Option<HofXPlan>,
}

impl HofX4D {
    pub fn new(backend: &'static str, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            backend,
            registry,
            plan: None,
        }
    }
}

impl Application for HofX4D {
    fn name(&self) -> ApplicationName {
        ApplicationName::HofX4D
    }

    fn configure(&mut self, config: &Value) -> Result<()> {
        let window_begin = required_str(config, "window begin", "hofx4d")?;
        let window_begin = DateTime::parse_from_rfc3339(window_begin).with_context(|| {
            format!("hofx4d: window begin \"{window_begin}\" is not an RFC 3339 timestamp")
        })?;
        let window_length = required_str(config, "window length", "hofx4d")?.to_owned();
        check_duration("window length", &window_length)?;

        let model = CapabilityRequest::from_section(
            CapabilityKind::Model,
            required(config, "model", "hofx4d")?,
            "hofx4d.model",
        )?;
        let observers = parse_observers(
            required(config, "observations", "hofx4d")?,
            "hofx4d.observations",
            false,
        )?;

        ensure_registered(
            &self.registry,
            self.backend,
            std::iter::once(&model).chain(observers.iter().flat_map(|o| o.requests.iter())),
        )?;

        self.plan = Some(HofXPlan {
            window_begin,
            window_length,
            model,
            observers,
        });
        Ok(())
    }

    fn execute<'a>(&'a mut self, ctx: &'a RunContext) -> ApplicationFuture<'a> {
        Box::pin(async move {
            let plan = self.plan.as_ref().context("hofx4d executed before configure")?;
            tracing::info!(
                backend = self.backend,
                window_begin = %plan.window_begin,
                window_length = %plan.window_length,
                model = %plan.model.name,
                "computing H(x) over the window"
            );

            build_capabilities(&self.registry, std::slice::from_ref(&plan.model), ctx).await?;
            for observer in &plan.observers {
                let built = build_capabilities(&self.registry, &observer.requests, ctx)
                    .await
                    .with_context(|| format!("observer {}", observer.obs_space))?;
                tracing::info!(
                    obs_space = %observer.obs_space,
                    filters = observer.count(CapabilityKind::ObsFilter),
                    capabilities = built.len(),
                    "observer ready"
                );
            }
            Ok(())
        })
    }
}
