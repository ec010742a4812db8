//! Top-level control flow for one process invocation.
//!
//! The dispatcher resolves the command line, registers the capabilities the selected
//! application needs, builds the run unit and hands it to an execution harness. It is
//! synchronous; only the harness starts an async runtime.

use crate::apps::ApplicationCatalog;
use crate::registry::{register_capabilities, CapabilityRegistry};
use crate::runtime::args::{resolve, LaunchMode};
use crate::runtime::fatal::{self, LaunchError};
use crate::runtime::harness::{ExecutionHarness, Run};
use std::ffi::OsString;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DispatchState {
    Start,
    ArgsValidated,
    CapabilitiesRegistered,
    ApplicationBuilt,
    Executing,
    Done,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DispatchState::Start => "start",
            DispatchState::ArgsValidated => "args validated",
            DispatchState::CapabilitiesRegistered => "capabilities registered",
            DispatchState::ApplicationBuilt => "application built",
            DispatchState::Executing => "executing",
            DispatchState::Done => "done",
        };
        f.write_str(label)
    }
}

pub struct Dispatcher {
    mode: LaunchMode,
    state: DispatchState,
    registry: Arc<CapabilityRegistry>,
}

impl Dispatcher {
    pub fn new(mode: LaunchMode) -> Self {
        Self {
            mode,
            state: DispatchState::Start,
            registry: Arc::new(CapabilityRegistry::new()),
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Registry as populated so far. Empty until registration has run.
    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        &self.registry
    }

    fn advance(&mut self, next: DispatchState) {
        debug_assert!(next > self.state, "dispatch states only move forward");
        tracing::trace!(from = %self.state, to = %next, "dispatch state change");
        self.state = next;
    }

    /// Runs one invocation end to end and returns the harness status verbatim.
    ///
    /// `make_harness` receives the argv left after the backend and application tokens
    /// are removed. Each call starts from an empty registry in the `Start` state.
    pub fn dispatch<H, F>(
        &mut self,
        args: Vec<OsString>,
        make_harness: F,
    ) -> Result<i32, LaunchError>
    where
        H: ExecutionHarness,
        F: FnOnce(Vec<OsString>) -> anyhow::Result<H>,
    {
        self.state = DispatchState::Start;
        self.registry = Arc::new(CapabilityRegistry::new());

        let command = resolve(args, &self.mode)?;
        self.advance(DispatchState::ArgsValidated);

        let mut harness = make_harness(command.args).map_err(LaunchError::HarnessSetup)?;

        let mut registry = CapabilityRegistry::new();
        let summary = register_capabilities(command.backend.as_ref(), command.application, &mut registry)?;
        tracing::debug!(
            backend = command.backend.name(),
            application = %command.application,
            factories = registry.len(),
            steps = summary.applied.len(),
            skipped = summary.skipped.len(),
            "capabilities registered"
        );
        self.registry = Arc::new(registry);
        self.advance(DispatchState::CapabilitiesRegistered);

        let catalog = ApplicationCatalog::new(command.backend.name(), Arc::clone(&self.registry));
        let app = catalog.create(command.application);
        self.advance(DispatchState::ApplicationBuilt);

        self.advance(DispatchState::Executing);
        let status = harness.execute(app);
        self.advance(DispatchState::Done);

        Ok(status)
    }
}

/// Process entry point shared by every executable.
///
/// Takes the raw argv, usually `std::env::args_os()`; tokens need not be UTF-8.
pub fn launch<I>(args: I, mode: LaunchMode) -> i32
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let args = args.into_iter().map(Into::into).collect();
    let mut dispatcher = Dispatcher::new(mode);
    match dispatcher.dispatch(args, Run::new) {
        Ok(status) => status,
        Err(error) => fatal::report(&error),
    }
}
