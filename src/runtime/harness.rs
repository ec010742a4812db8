use crate::runtime::application::{Application, RunContext};
use crate::runtime::config::RunConfig;
use crate::runtime::telemetry::{init_tracing, Telemetry};
use anyhow::{Context, Result};
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio_util::sync::CancellationToken;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Conventional status for a run stopped by SIGINT.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Runs a fully built run unit and turns its outcome into a process status.
///
/// The harness takes ownership of the unit and drops it before returning, whatever
/// the outcome.
pub trait ExecutionHarness {
    fn execute(&mut self, app: Box<dyn Application>) -> i32;
}

enum Outcome {
    Finished(Result<()>),
    Interrupted,
}

/// Production harness: loads the JSON configuration, configures the unit and drives
/// it on a current-thread runtime until it finishes or Ctrl-C arrives.
pub struct Run {
    config: RunConfig,
    telemetry: Arc<Telemetry>,
    shutdown: CancellationToken,
}

impl Run {
    /// Parses the harness options and installs logging.
    pub fn new(args: Vec<OsString>) -> Result<Self> {
        let config = RunConfig::from_args(&args)?;
        Self::with_config(config)
    }

    pub fn with_config(config: RunConfig) -> Result<Self> {
        init_tracing(config.log_directive(), config.output_file())?;
        Ok(Self {
            config,
            telemetry: Arc::new(Telemetry::default()),
            shutdown: CancellationToken::new(),
        })
    }

    fn load_config(&self) -> Result<Value> {
        let path = self.config.config_file();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse configuration {}", path.display()))
    }

    fn drive(&self, app: &mut dyn Application) -> Result<Outcome> {
        let document = self.load_config()?;
        app.configure(&document)
            .with_context(|| format!("invalid {} configuration", app.name()))?;

        if self.config.validate_only() {
            tracing::info!(application = %app.name(), "configuration is valid");
            return Ok(Outcome::Finished(Ok(())));
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start the async runtime")?;
        let ctx = RunContext::new(Arc::clone(&self.telemetry), self.shutdown.clone());

        let outcome = runtime.block_on(async {
            tokio::select! {
                result = app.execute(&ctx) => Outcome::Finished(result),
                Ok(()) = signal::ctrl_c() => {
                    tracing::warn!("Ctrl-C received; cancelling run");
                    ctx.shutdown().cancel();
                    Outcome::Interrupted
                }
            }
        });
        Ok(outcome)
    }
}

impl ExecutionHarness for Run {
    fn execute(&mut self, mut app: Box<dyn Application>) -> i32 {
        let name = app.name();
        let started = Instant::now();
        tracing::info!(
            application = %name,
            config = %self.config.config_file().display(),
            validate_only = self.config.validate_only(),
            "starting run"
        );

        let outcome = self
            .drive(app.as_mut())
            .unwrap_or_else(|error| Outcome::Finished(Err(error)));
        drop(app);

        let snapshot = self.telemetry.snapshot();
        let elapsed = started.elapsed();
        match outcome {
            Outcome::Finished(Ok(())) => {
                tracing::info!(
                    application = %name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    capabilities_built = snapshot.capabilities_built,
                    "run finished"
                );
                EXIT_SUCCESS
            }
            Outcome::Finished(Err(error)) => {
                tracing::error!(
                    application = %name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    capabilities_built = snapshot.capabilities_built,
                    capability_failures = snapshot.capability_failures,
                    error = %format!("{error:#}"),
                    "run failed"
                );
                eprintln!("{name}: {error:#}");
                EXIT_FAILURE
            }
            Outcome::Interrupted => {
                tracing::warn!(
                    application = %name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "run interrupted"
                );
                EXIT_INTERRUPTED
            }
        }
    }
}
