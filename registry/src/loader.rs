use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice;
use std::sync::Arc;

use crate::contract::ContractId;
use crate::error::Result;
use crate::global::global;
use crate::registry::Registry;

/// An ordered, immutable view of every provider registered for contract
/// `S`, resolved and validated when the loader is built.
///
/// Construction walks the registry's snapshot for `S` in priority order,
/// resolves each descriptor (constructing singletons on first use) and
/// converts the instances to `Arc<S>`. Any construction failure or contract
/// mismatch aborts the whole load; a contract nothing was registered for
/// yields an empty loader.
///
/// Loaders are cheap, re-creatable views. Equality and hashing consider
/// only the bound contract, never the resolved contents, so two loaders of
/// the same contract are equal even when built from different registries.
///
/// # Examples
///
/// ```
/// use spindle::{ContractId, Loader, Provider, Registry};
///
/// trait Transport: Send + Sync {
///   fn scheme(&self) -> &'static str;
/// }
///
/// struct Tcp;
/// impl Transport for Tcp {
///   fn scheme(&self) -> &'static str {
///     "tcp"
///   }
/// }
///
/// let registry = Registry::new();
/// registry
///   .register(
///     Provider::instance(Tcp).provides::<dyn Transport>(|p| p),
///     &[ContractId::of::<dyn Transport>()],
///     &[],
///   )
///   .unwrap();
///
/// let transports = Loader::<dyn Transport>::load_from(&registry).unwrap();
/// for transport in &transports {
///   assert_eq!(transport.scheme(), "tcp");
/// }
/// ```
pub struct Loader<S: ?Sized> {
  contract: ContractId,
  providers: Vec<Arc<S>>,
}

impl<S> Loader<S>
where
  S: ?Sized + Any + Send + Sync,
{
  /// Loads the providers of `S` from the global registry.
  pub fn load() -> Result<Self> {
    Self::load_from(global())
  }

  /// Loads the providers of `S` from an explicit registry.
  pub fn load_from(registry: &Registry) -> Result<Self> {
    let contract = ContractId::of::<S>();
    let snapshot = registry.lookup(contract);

    let mut providers = Vec::with_capacity(snapshot.len());
    for registration in &snapshot {
      let descriptor = registration.provider();
      let instance = descriptor.resolve()?;
      providers.push(descriptor.cast::<S>(&instance, contract)?);
    }

    tracing::debug!(
      contract = contract.name(),
      providers = providers.len(),
      "loader built"
    );
    Ok(Self { contract, providers })
  }

  /// The contract this loader is bound to.
  pub fn contract(&self) -> ContractId {
    self.contract
  }

  /// The resolved providers, highest priority first.
  pub fn list(&self) -> &[Arc<S>] {
    &self.providers
  }

  /// Iterates the resolved providers from the beginning, in the same order
  /// as [`list`](Loader::list). Every call restarts at the first provider.
  pub fn iter(&self) -> slice::Iter<'_, Arc<S>> {
    self.providers.iter()
  }

  /// Number of resolved providers.
  pub fn len(&self) -> usize {
    self.providers.len()
  }

  /// Whether no provider is registered for the contract.
  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }
}

impl<'a, S: ?Sized> IntoIterator for &'a Loader<S> {
  type Item = &'a Arc<S>;
  type IntoIter = slice::Iter<'a, Arc<S>>;

  fn into_iter(self) -> Self::IntoIter {
    self.providers.iter()
  }
}

impl<S: ?Sized> PartialEq for Loader<S> {
  fn eq(&self, other: &Self) -> bool {
    self.contract == other.contract
  }
}

impl<S: ?Sized> Eq for Loader<S> {}

impl<S: ?Sized> Hash for Loader<S> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.contract.hash(state);
  }
}

impl<S: ?Sized> fmt::Debug for Loader<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Loader")
      .field("contract", &self.contract)
      .field("providers", &self.providers.len())
      .finish()
  }
}
