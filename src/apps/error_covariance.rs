use super::sections::{build_capabilities, ensure_registered, required, CapabilityRequest};
use super::ApplicationName;
use crate::registry::{CapabilityKind, CapabilityRegistry};
use crate::runtime::application::{Application, ApplicationFuture, RunContext};
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;

/// Builds and diagnoses a background-error covariance model (the `bump` application).
pub struct ErrorCovarianceToolbox {
    backend: &'static str,
    registry: Arc<CapabilityRegistry>,
    covariance: Option<CapabilityRequest>,
}

impl ErrorCovarianceToolbox {
    pub fn new(backend: &'static str, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            backend,
            registry,
            covariance: None,
        }
    }
}

impl Application for ErrorCovarianceToolbox {
    fn name(&self) -> ApplicationName {
        ApplicationName::ErrorCovarianceToolbox
    }

    fn configure(&mut self, config: &Value) -> Result<()> {
        let section = required(config, "background error", "bump")?;
        let request = CapabilityRequest::from_section(
            CapabilityKind::Covariance,
            section,
            "bump.background error",
        )?;
        ensure_registered(&self.registry, self.backend, [&request])?;
        self.covariance = Some(request);
        Ok(())
    }

    fn execute<'a>(&'a mut self, ctx: &'a RunContext) -> ApplicationFuture<'a> {
        Box::pin(async move {
            let request = self
                .covariance
                .as_ref()
                .context("bump executed before configure")?;
            let built =
                build_capabilities(&self.registry, std::slice::from_ref(request), ctx).await?;
            tracing::info!(
                backend = self.backend,
                covariance = ?built,
                "background error covariance ready"
            );
            Ok(())
        })
    }
}
