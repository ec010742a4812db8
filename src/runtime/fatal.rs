use crate::registry::RegistryError;
use crate::runtime::dispatcher::DispatchState;
use anyhow::Error as AnyError;
use std::fmt;

/// Status for a command line that cannot be interpreted.
pub const EXIT_USAGE: i32 = 2;
/// Status for every other launch failure.
pub const EXIT_LAUNCH_FAILURE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Backend,
    Application,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Backend => f.write_str("Backend"),
            NameKind::Application => f.write_str("Application"),
        }
    }
}

/// Failure before the run unit reaches the harness. Every instance is fatal.
#[derive(Debug)]
pub enum LaunchError {
    Usage {
        message: String,
    },
    UnrecognizedName {
        kind: NameKind,
        token: String,
        expected: Vec<&'static str>,
    },
    RegistrationConflict(RegistryError),
    HarnessSetup(AnyError),
}

impl LaunchError {
    /// State the dispatcher was in when the error occurred.
    pub fn stage(&self) -> DispatchState {
        match self {
            LaunchError::Usage { .. } | LaunchError::UnrecognizedName { .. } => {
                DispatchState::Start
            }
            LaunchError::RegistrationConflict(_) | LaunchError::HarnessSetup(_) => {
                DispatchState::ArgsValidated
            }
        }
    }

    pub fn exit_status(&self) -> i32 {
        match self {
            LaunchError::Usage { .. } => EXIT_USAGE,
            _ => EXIT_LAUNCH_FAILURE,
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Usage { message } => f.write_str(message),
            LaunchError::UnrecognizedName {
                kind,
                token,
                expected,
            } => write!(
                f,
                "{kind} not recognized: {token} (expected one of: {})",
                expected.join(", ")
            ),
            LaunchError::RegistrationConflict(error) => {
                write!(f, "capability registration failed: {error}")
            }
            LaunchError::HarnessSetup(error) => write!(f, "{error:#}"),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::RegistrationConflict(error) => Some(error),
            LaunchError::HarnessSetup(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl From<RegistryError> for LaunchError {
    fn from(error: RegistryError) -> Self {
        LaunchError::RegistrationConflict(error)
    }
}

/// Writes the diagnostic to stderr (and the log, when one is installed) and returns
/// the process status to exit with.
pub fn report(error: &LaunchError) -> i32 {
    tracing::error!(
        stage = ?error.stage(),
        error = %error,
        "fatal launch error; aborting"
    );
    eprintln!("{error}");
    error.exit_status()
}
