use thiserror::Error;

/// A boxed error carrying the underlying cause of a provider construction
/// failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for registry and loader operations.
#[derive(Debug, Error)]
pub enum Error {
  /// A provider descriptor was registered without any contracts.
  #[error("provider `{provider}` was registered without any contracts")]
  InvalidDescriptor {
    /// Type name of the offending provider.
    provider: &'static str,
  },

  /// A provider factory failed while constructing its instance.
  #[error("provider `{provider}` could not be initialized")]
  ProviderInitialization {
    /// Type name of the provider whose construction failed.
    provider: &'static str,
    /// The underlying construction failure.
    #[source]
    source: BoxError,
  },

  /// A resolved instance cannot serve the requested contract.
  #[error("provider `{provider}` does not serve contract `{contract}`")]
  ContractMismatch {
    /// Type name of the concrete provider instance.
    provider: &'static str,
    /// Type name of the requested contract.
    contract: &'static str,
  },
}

/// A specialized `Result` type for registry operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
