use std::ffi::OsString;
use std::sync::{Arc, Mutex};

use rdas::{
    Application, ApplicationName, BackendProfile, BuildCapability, CapabilityKind,
    CapabilityRegistry, ExecutionHarness, RegistryError,
};
use serde_json::Value;

/// Harness stand-in that records which run units it was handed.
#[derive(Clone, Default)]
pub struct RecordingHarness {
    status: i32,
    args: Arc<Mutex<Vec<OsString>>>,
    executed: Arc<Mutex<Vec<ApplicationName>>>,
}

impl RecordingHarness {
    pub fn with_status(status: i32) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Factory suitable for `Dispatcher::dispatch`; keeps the argv it was built from.
    pub fn factory(&self) -> impl FnOnce(Vec<OsString>) -> anyhow::Result<Self> {
        let harness = self.clone();
        move |args| {
            *harness.args.lock().unwrap() = args;
            Ok(harness)
        }
    }

    pub fn args(&self) -> Vec<OsString> {
        self.args.lock().unwrap().clone()
    }

    pub fn executed(&self) -> Vec<ApplicationName> {
        self.executed.lock().unwrap().clone()
    }
}

impl ExecutionHarness for RecordingHarness {
    fn execute(&mut self, app: Box<dyn Application>) -> i32 {
        self.executed.lock().unwrap().push(app.name());
        self.status
    }
}

/// Model product that claims the FV3 model's registry name.
#[derive(Debug)]
pub struct ShadowFv3Model;

impl BuildCapability for ShadowFv3Model {
    const KIND: CapabilityKind = CapabilityKind::Model;
    const NAME: &'static str = "FV3LM";

    fn from_params(_params: &Value) -> anyhow::Result<Self> {
        Ok(Self)
    }
}

/// Wraps a real profile and logs every bind call made against it.
#[derive(Clone)]
pub struct RecordingProfile {
    inner: Arc<dyn BackendProfile>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    shadow_model: bool,
}

impl RecordingProfile {
    pub fn new(inner: impl BackendProfile + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::default(),
            shadow_model: false,
        }
    }

    /// Also binds [`ShadowFv3Model`] after the wrapped profile's models.
    pub fn with_shadow_model(mut self) -> Self {
        self.shadow_model = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl BackendProfile for RecordingProfile {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn bind_models(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        self.record("models");
        self.inner.bind_models(registry)?;
        if self.shadow_model {
            registry.register_type::<ShadowFv3Model>()?;
        }
        Ok(())
    }

    fn bind_covariances(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        self.record("covariances");
        self.inner.bind_covariances(registry)
    }

    fn bind_obs_errors(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        self.record("obs errors");
        self.inner.bind_obs_errors(registry)
    }

    fn bind_obs_filters(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        self.record("obs filters");
        self.inner.bind_obs_filters(registry)
    }

    fn bind_obs_localizations(
        &self,
        registry: &mut CapabilityRegistry,
    ) -> Result<(), RegistryError> {
        self.record("obs localizations");
        self.inner.bind_obs_localizations(registry)
    }

    fn supports_localization(&self) -> bool {
        self.inner.supports_localization()
    }

    fn bind_localizations(&self, registry: &mut CapabilityRegistry) -> Result<(), RegistryError> {
        self.record("localizations");
        self.inner.bind_localizations(registry)
    }
}
