use crate::apps::ApplicationName;
use crate::runtime::telemetry::Telemetry;
use anyhow::Result;
use core::future::Future;
use core::pin::Pin;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub type ApplicationFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// State the harness hands to an application for the duration of one execution.
#[derive(Debug, Clone)]
pub struct RunContext {
    telemetry: Arc<Telemetry>,
    shutdown: CancellationToken,
}

impl RunContext {
    pub fn new(telemetry: Arc<Telemetry>, shutdown: CancellationToken) -> Self {
        Self {
            telemetry,
            shutdown,
        }
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }

    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

/// Run unit: the top-level behavior of one named workflow.
///
/// The harness takes ownership, calls [`Application::configure`] once with the parsed
/// configuration, then [`Application::execute`] at most once.
pub trait Application: Send {
    fn name(&self) -> ApplicationName;

    /// Parses and checks the configuration, including that every capability it names is
    /// registered for the current backend.
    fn configure(&mut self, config: &Value) -> Result<()>;

    fn execute<'a>(&'a mut self, ctx: &'a RunContext) -> ApplicationFuture<'a>;
}
