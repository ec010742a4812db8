//! Command-line resolution: picks the backend and application tokens off the front of
//! argv and leaves the remaining options for the harness.

use crate::apps::ApplicationName;
use crate::backends::{BackendCatalog, BackendProfile};
use crate::runtime::fatal::{LaunchError, NameKind};
use std::ffi::{OsStr, OsString};
use std::sync::Arc;

const DEFAULT_PROGRAM: &str = "rdas";

/// Whether the executable is bound to one backend or takes it as the first argument.
#[derive(Clone)]
pub enum LaunchMode {
    Single(Arc<dyn BackendProfile>),
    Multi(BackendCatalog),
}

impl LaunchMode {
    pub fn single(profile: impl BackendProfile + 'static) -> Self {
        LaunchMode::Single(Arc::new(profile))
    }

    /// Tokens consumed ahead of the application options.
    pub fn leading_tokens(&self) -> usize {
        match self {
            LaunchMode::Single(_) => 1,
            LaunchMode::Multi(_) => 2,
        }
    }

    fn usage(&self, program: &str) -> String {
        match self {
            LaunchMode::Single(_) => format!("Usage: {program} <application> <options>"),
            LaunchMode::Multi(_) => format!("Usage: {program} <backend> <application> <options>"),
        }
    }
}

impl std::fmt::Debug for LaunchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchMode::Single(profile) => f.debug_tuple("Single").field(&profile.name()).finish(),
            LaunchMode::Multi(catalog) => f.debug_tuple("Multi").field(catalog).finish(),
        }
    }
}

/// Outcome of a successful resolution.
pub struct ResolvedCommand {
    pub backend: Arc<dyn BackendProfile>,
    pub application: ApplicationName,
    /// Program name followed by the untouched remaining options.
    pub args: Vec<OsString>,
}

impl std::fmt::Debug for ResolvedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCommand")
            .field("backend", &self.backend.name())
            .field("application", &self.application)
            .field("args", &self.args)
            .finish()
    }
}

/// Tokens that are not valid UTF-8 are compared lossily, so they never match a name.
fn fold_token(token: &OsStr) -> String {
    token.to_string_lossy().to_ascii_lowercase()
}

pub fn resolve(mut args: Vec<OsString>, mode: &LaunchMode) -> Result<ResolvedCommand, LaunchError> {
    let leading = mode.leading_tokens();
    if args.len() < leading + 1 {
        let program = args
            .first()
            .map(|program| program.to_string_lossy())
            .unwrap_or(DEFAULT_PROGRAM.into());
        return Err(LaunchError::Usage {
            message: mode.usage(&program),
        });
    }

    let (backend, app_index) = match mode {
        LaunchMode::Single(profile) => (Arc::clone(profile), 1),
        LaunchMode::Multi(catalog) => {
            let token = fold_token(&args[1]);
            let profile = catalog
                .resolve(&token)
                .ok_or_else(|| LaunchError::UnrecognizedName {
                    kind: NameKind::Backend,
                    token,
                    expected: catalog.names(),
                })?;
            (profile, 2)
        }
    };

    let token = fold_token(&args[app_index]);
    let application =
        ApplicationName::parse(&token).ok_or_else(|| LaunchError::UnrecognizedName {
            kind: NameKind::Application,
            token,
            expected: ApplicationName::ALL.iter().map(|app| app.as_str()).collect(),
        })?;

    args.drain(1..=leading);

    Ok(ResolvedCommand {
        backend,
        application,
        args,
    })
}
