pub mod apps;
pub mod backends;
pub mod capabilities;
pub mod registry;
pub mod runtime;

pub use apps::{ApplicationCatalog, ApplicationName};
pub use backends::{BackendCatalog, BackendProfile, Fv3Jedi, MpasJedi};
pub use registry::{
    register_capabilities, BuildCapability, Capability, CapabilityKind, CapabilityRegistry,
    Registration, RegistrationPlan, RegistrationStep, RegistrationSummary, RegistryError,
};
pub use runtime::application::{Application, ApplicationFuture, RunContext};
pub use runtime::args::{resolve, LaunchMode, ResolvedCommand};
pub use runtime::config::{RunConfig, RunConfigBuilder};
pub use runtime::dispatcher::{launch, DispatchState, Dispatcher};
pub use runtime::fatal::{LaunchError, NameKind};
pub use runtime::harness::{ExecutionHarness, Run};
pub use runtime::telemetry::{init_tracing, Telemetry, TelemetrySnapshot};
