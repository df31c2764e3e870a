use std::sync::Arc;

use dashmap::DashMap;

use crate::contract::ContractId;
use crate::descriptor::Provider;
use crate::error::{Error, Result};

/// One entry in a contract's provider list: a shared descriptor plus the
/// priority it carries under that contract.
#[derive(Clone, Debug)]
pub struct Registration {
  provider: Arc<Provider>,
  priority: i32,
}

impl Registration {
  /// The shared provider descriptor.
  pub fn provider(&self) -> &Arc<Provider> {
    &self.provider
  }

  /// The priority of this descriptor under the looked-up contract.
  /// Higher priorities resolve earlier.
  pub fn priority(&self) -> i32 {
    self.priority
  }
}

/// A thread-safe, append-only mapping from contract identity to the
/// providers registered for it.
///
/// Registration is typically performed once during startup by generated or
/// hand-written discovery code; lookups then run concurrently from any
/// thread for the rest of the process lifetime. Most applications use the
/// process-wide instance returned by [`global`](crate::global), while tests
/// construct isolated registries.
///
/// # Examples
///
/// ```
/// use spindle::{ContractId, Loader, Provider, Registry};
///
/// trait Codec: Send + Sync {
///   fn name(&self) -> &'static str;
/// }
///
/// struct Json;
/// impl Codec for Json {
///   fn name(&self) -> &'static str {
///     "json"
///   }
/// }
///
/// let registry = Registry::new();
/// registry
///   .register(
///     Provider::singleton(|| Json).provides::<dyn Codec>(|p| p),
///     &[ContractId::of::<dyn Codec>()],
///     &[10],
///   )
///   .unwrap();
///
/// let codecs = Loader::<dyn Codec>::load_from(&registry).unwrap();
/// assert_eq!(codecs.list()[0].name(), "json");
/// ```
#[derive(Default)]
pub struct Registry {
  entries: DashMap<ContractId, Vec<Registration>>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers one provider descriptor under every contract in `contracts`.
  ///
  /// `priorities` pairs with `contracts` by index: missing entries default
  /// to 0, excess entries are discarded. The descriptor object itself is
  /// shared across all listed contracts, so a singleton registered under
  /// several contracts yields the same instance through each of them.
  ///
  /// Registrations are never deduplicated. Registering the same provider
  /// type twice creates two independent descriptors, each resolved on its
  /// own.
  ///
  /// Fails with [`Error::InvalidDescriptor`] when `contracts` is empty.
  pub fn register(
    &self,
    provider: impl Into<Provider>,
    contracts: &[ContractId],
    priorities: &[i32],
  ) -> Result<()> {
    let provider = provider.into();
    if contracts.is_empty() {
      return Err(Error::InvalidDescriptor {
        provider: provider.provider_name(),
      });
    }

    let descriptor = Arc::new(provider);
    for (index, contract) in contracts.iter().enumerate() {
      let priority = priorities.get(index).copied().unwrap_or(0);
      self.entries.entry(*contract).or_default().push(Registration {
        provider: Arc::clone(&descriptor),
        priority,
      });
    }

    tracing::debug!(
      provider = descriptor.provider_name(),
      contracts = contracts.len(),
      "provider registered"
    );
    Ok(())
  }

  /// Returns a snapshot of the registrations for `contract`, ordered by
  /// descending priority with ties in registration order. A contract
  /// nothing was registered for yields an empty vector.
  ///
  /// The snapshot is detached from the registry: registrations made after
  /// this call do not appear in the returned vector.
  pub fn lookup(&self, contract: ContractId) -> Vec<Registration> {
    let mut snapshot = self
      .entries
      .get(&contract)
      .map(|entries| entries.value().clone())
      .unwrap_or_default();
    snapshot.sort_by(|a, b| b.priority.cmp(&a.priority));
    snapshot
  }
}
