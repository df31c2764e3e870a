//! Provides access to a global, static `Registry` instance.

use once_cell::sync::Lazy;

use crate::registry::Registry;

// The one and only global registry instance, created on first access.
static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Provides a reference to the global registry instance.
///
/// Discovery code registers providers here during startup, and
/// [`load`](crate::load) reads from here. The instance lives for the whole
/// process; tests that need isolation should construct their own
/// [`Registry`] and use [`Loader::load_from`](crate::Loader::load_from).
///
/// # Examples
///
/// ```
/// use spindle::{global, ContractId, Provider};
///
/// global()
///   .register(
///     Provider::instance(String::from("hello")).provides::<String>(|p| p),
///     &[ContractId::of::<String>()],
///     &[],
///   )
///   .unwrap();
/// ```
pub fn global() -> &'static Registry {
  &GLOBAL_REGISTRY
}
