use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;

/// Directive used when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Installs the process-wide tracing subscriber (if one is not already active).
///
/// `RUST_LOG` takes precedence over `directive`. With `log_file` set, output goes to
/// that file instead of stdout. Calling this more than once is harmless; only the
/// first call takes effect.
pub fn init_tracing(directive: &str, log_file: Option<&Path>) -> Result<()> {
    if TRACING_INIT.get().is_some() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log directive \"{directive}\""))?,
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .try_init();
        }
    }

    let _ = TRACING_INIT.set(());
    Ok(())
}

/// Counters accumulated while an application runs.
#[derive(Default, Debug)]
pub struct Telemetry {
    capabilities_built: AtomicU64,
    capability_failures: AtomicU64,
}

impl Telemetry {
    pub fn record_capability_built(&self) {
        self.capabilities_built.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_capability_failure(&self) {
        self.capability_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            capabilities_built: self.capabilities_built.load(Ordering::Relaxed),
            capability_failures: self.capability_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub capabilities_built: u64,
    pub capability_failures: u64,
}
