use anyhow::{Context, Result};
use serde_json::Value;
use std::any::{type_name, TypeId};
use std::collections::BTreeMap;
use std::fmt;

/// Families of swappable behavior that applications obtain by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityKind {
    Model,
    Covariance,
    ObsError,
    ObsFilter,
    ObsLocalization,
    Localization,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 6] = [
        CapabilityKind::Model,
        CapabilityKind::Covariance,
        CapabilityKind::ObsError,
        CapabilityKind::ObsFilter,
        CapabilityKind::ObsLocalization,
        CapabilityKind::Localization,
    ];

    /// Configuration key whose value selects an implementation of this kind.
    pub fn selector_key(self) -> &'static str {
        match self {
            CapabilityKind::Model => "name",
            CapabilityKind::Covariance | CapabilityKind::ObsError => "covariance model",
            CapabilityKind::ObsFilter => "filter",
            CapabilityKind::ObsLocalization | CapabilityKind::Localization => {
                "localization method"
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CapabilityKind::Model => "model",
            CapabilityKind::Covariance => "covariance",
            CapabilityKind::ObsError => "obs error",
            CapabilityKind::ObsFilter => "obs filter",
            CapabilityKind::ObsLocalization => "obs localization",
            CapabilityKind::Localization => "localization",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A constructed capability instance.
pub trait Capability: fmt::Debug + Send + Sync {
    fn kind(&self) -> CapabilityKind;

    /// Registry name the instance was built under.
    fn name(&self) -> &'static str;
}

/// Implemented by concrete capability types so they can be registered by type.
pub trait BuildCapability: fmt::Debug + Send + Sync + Sized + 'static {
    const KIND: CapabilityKind;
    const NAME: &'static str;

    /// Builds the capability from its configuration section.
    fn from_params(params: &Value) -> Result<Self>;
}

impl<T: BuildCapability> Capability for T {
    fn kind(&self) -> CapabilityKind {
        T::KIND
    }

    fn name(&self) -> &'static str {
        T::NAME
    }
}

type Constructor = fn(&Value) -> Result<Box<dyn Capability>>;

/// Constructor for one concrete capability type.
///
/// Two factories are the same when they build the same product type, which is what
/// makes repeated registration of an identical binding a no-op.
#[derive(Clone, Copy)]
pub struct CapabilityFactory {
    product: TypeId,
    product_name: &'static str,
    construct: Constructor,
}

impl CapabilityFactory {
    pub fn of<T: BuildCapability>() -> Self {
        Self {
            product: TypeId::of::<T>(),
            product_name: type_name::<T>(),
            construct: construct_boxed::<T>,
        }
    }

    pub fn product_name(&self) -> &'static str {
        self.product_name
    }

    pub fn same_product(&self, other: &CapabilityFactory) -> bool {
        self.product == other.product
    }

    pub fn build(&self, params: &Value) -> Result<Box<dyn Capability>> {
        (self.construct)(params)
    }
}

impl fmt::Debug for CapabilityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityFactory")
            .field("product", &self.product_name)
            .finish()
    }
}

fn construct_boxed<T: BuildCapability>(params: &Value) -> Result<Box<dyn Capability>> {
    let capability = T::from_params(params)
        .with_context(|| format!("invalid {} \"{}\" parameters", T::KIND, T::NAME))?;
    Ok(Box::new(capability))
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    Conflict {
        kind: CapabilityKind,
        name: String,
        existing: &'static str,
        incoming: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Conflict {
                kind,
                name,
                existing,
                incoming,
            } => write!(
                f,
                "{kind} \"{name}\" is already registered to {existing}; refusing to rebind it to {incoming}"
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Factories keyed by capability kind and name.
///
/// Populated through `&mut` during launch, then shared read-only with the run unit.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    factories: BTreeMap<(CapabilityKind, String), CapabilityFactory>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        kind: CapabilityKind,
        name: impl Into<String>,
        factory: CapabilityFactory,
    ) -> Result<Registration, RegistryError> {
        let name = name.into();
        match self.factories.get(&(kind, name.clone())) {
            Some(existing) if existing.same_product(&factory) => Ok(Registration::Unchanged),
            Some(existing) => Err(RegistryError::Conflict {
                kind,
                name,
                existing: existing.product_name(),
                incoming: factory.product_name(),
            }),
            None => {
                self.factories.insert((kind, name), factory);
                Ok(Registration::Inserted)
            }
        }
    }

    /// Registers `T` under its own kind and name.
    pub fn register_type<T: BuildCapability>(&mut self) -> Result<Registration, RegistryError> {
        self.register(T::KIND, T::NAME, CapabilityFactory::of::<T>())
    }

    pub fn lookup(&self, kind: CapabilityKind, name: &str) -> Option<&CapabilityFactory> {
        self.factories.get(&(kind, name.to_owned()))
    }

    pub fn contains(&self, kind: CapabilityKind, name: &str) -> bool {
        self.lookup(kind, name).is_some()
    }

    /// Registered names for `kind`, sorted.
    pub fn names(&self, kind: CapabilityKind) -> Vec<&str> {
        self.factories
            .keys()
            .filter(|(registered, _)| *registered == kind)
            .map(|(_, name)| name.as_str())
            .collect()
    }

    pub fn build(
        &self,
        kind: CapabilityKind,
        name: &str,
        params: &Value,
    ) -> Result<Box<dyn Capability>> {
        let factory = self.lookup(kind, name).with_context(|| {
            format!(
                "no {kind} named \"{name}\" is registered (available: {})",
                self.names(kind).join(", ")
            )
        })?;
        factory.build(params)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn count(&self, kind: CapabilityKind) -> usize {
        self.factories
            .keys()
            .filter(|(registered, _)| *registered == kind)
            .count()
    }
}
