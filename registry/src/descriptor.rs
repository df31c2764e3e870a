//! Provider descriptors and the type-erasure machinery behind them.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::contract::ContractId;
use crate::error::{BoxError, Error, Result};

/// A provider instance with its concrete type erased.
pub(crate) type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// A stored factory producing one type-erased instance per call.
type ConstructFn = Box<dyn Fn() -> Result<ErasedInstance, BoxError> + Send + Sync>;

/// A thunk converting the erased instance into `Arc<S>` for one declared
/// contract `S`. The returned box holds exactly an `Arc<S>`.
type CastFn = Box<dyn Fn(&ErasedInstance) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// How a descriptor obtains its instance.
enum Source {
  /// An object constructed by the caller; every resolution observes it.
  Instance(ErasedInstance),
  /// Constructed on first resolution, then memoized for the process
  /// lifetime. A failed construction memoizes nothing.
  Singleton {
    cell: OnceCell<ErasedInstance>,
    construct: ConstructFn,
  },
  /// Constructed anew on every resolution.
  Transient { construct: ConstructFn },
}

/// The registry's record of one provider: how to obtain an instance and
/// which contracts that instance serves.
///
/// A `Provider` starts as a typed [`ProviderBuilder`] returned by
/// [`Provider::instance`], [`Provider::singleton`] or
/// [`Provider::transient`]. While the concrete type is still known, each
/// [`provides`](ProviderBuilder::provides) call records the conversion to
/// one contract; afterwards the descriptor is fully type-erased and can be
/// stored and resolved without knowing the concrete type.
pub struct Provider {
  name: &'static str,
  source: Source,
  casts: HashMap<TypeId, CastFn>,
}

impl Provider {
  /// Starts a descriptor wrapping an already-constructed instance.
  pub fn instance<T>(value: T) -> ProviderBuilder<T>
  where
    T: Any + Send + Sync,
  {
    ProviderBuilder::new(Source::Instance(Arc::new(value)))
  }

  /// Starts a descriptor that constructs its provider on first resolution
  /// and memoizes it for the lifetime of the process.
  pub fn singleton<T, F>(factory: F) -> ProviderBuilder<T>
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self::try_singleton(move || Ok::<_, BoxError>(factory()))
  }

  /// Fallible form of [`Provider::singleton`].
  ///
  /// A construction failure surfaces as [`Error::ProviderInitialization`]
  /// and memoizes nothing, so a later resolution runs the factory again.
  pub fn try_singleton<T, E, F>(factory: F) -> ProviderBuilder<T>
  where
    T: Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
  {
    ProviderBuilder::new(Source::Singleton {
      cell: OnceCell::new(),
      construct: erase_factory(factory),
    })
  }

  /// Starts a descriptor that constructs a fresh provider on every
  /// resolution.
  pub fn transient<T, F>(factory: F) -> ProviderBuilder<T>
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self::try_transient(move || Ok::<_, BoxError>(factory()))
  }

  /// Fallible form of [`Provider::transient`].
  pub fn try_transient<T, E, F>(factory: F) -> ProviderBuilder<T>
  where
    T: Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
  {
    ProviderBuilder::new(Source::Transient {
      construct: erase_factory(factory),
    })
  }

  /// Type name of the concrete provider this descriptor produces.
  pub fn provider_name(&self) -> &'static str {
    self.name
  }

  /// Whether resolutions observe a single shared instance.
  pub fn is_singleton(&self) -> bool {
    !matches!(self.source, Source::Transient { .. })
  }

  /// Obtains the type-erased instance per the descriptor's lifetime rules.
  pub(crate) fn resolve(&self) -> Result<ErasedInstance> {
    match &self.source {
      Source::Instance(value) => Ok(Arc::clone(value)),
      Source::Singleton { cell, construct } => cell
        .get_or_try_init(|| {
          tracing::trace!(provider = self.name, "constructing singleton provider");
          construct()
        })
        .map(Arc::clone)
        .map_err(|source| Error::ProviderInitialization {
          provider: self.name,
          source,
        }),
      Source::Transient { construct } => {
        construct().map_err(|source| Error::ProviderInitialization {
          provider: self.name,
          source,
        })
      }
    }
  }

  /// Converts the erased instance to contract `S`.
  ///
  /// Fails with [`Error::ContractMismatch`] when this descriptor never
  /// declared `S` through [`provides`](ProviderBuilder::provides).
  pub(crate) fn cast<S>(&self, instance: &ErasedInstance, contract: ContractId) -> Result<Arc<S>>
  where
    S: ?Sized + Any + Send + Sync,
  {
    self
      .casts
      .get(&contract.type_id())
      .and_then(|cast| cast(instance))
      .and_then(|boxed| boxed.downcast::<Arc<S>>().ok())
      .map(|boxed| *boxed)
      .ok_or(Error::ContractMismatch {
        provider: self.name,
        contract: contract.name(),
      })
  }
}

impl fmt::Debug for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = match self.source {
      Source::Instance(_) => "instance",
      Source::Singleton { .. } => "singleton",
      Source::Transient { .. } => "transient",
    };
    write!(f, "Provider({}, {})", self.name, kind)
  }
}

fn erase_factory<T, E, F>(factory: F) -> ConstructFn
where
  T: Any + Send + Sync,
  E: Into<BoxError>,
  F: Fn() -> Result<T, E> + Send + Sync + 'static,
{
  Box::new(move || match factory() {
    Ok(value) => Ok(Arc::new(value) as ErasedInstance),
    Err(cause) => Err(cause.into()),
  })
}

/// The typed half of descriptor construction.
///
/// While the concrete type `T` is still visible, each
/// [`provides`](ProviderBuilder::provides) call captures the conversion
/// from `Arc<T>` to `Arc<S>` for one contract `S`. Conversions are plain
/// coercions written as `|p| p`, so declaring a contract the provider does
/// not implement is rejected at compile time.
pub struct ProviderBuilder<T> {
  inner: Provider,
  _concrete: PhantomData<fn() -> T>,
}

impl<T> ProviderBuilder<T>
where
  T: Any + Send + Sync,
{
  fn new(source: Source) -> Self {
    Self {
      inner: Provider {
        name: type_name::<T>(),
        source,
        casts: HashMap::new(),
      },
      _concrete: PhantomData,
    }
  }

  /// Declares that the provider serves contract `S`.
  ///
  /// # Examples
  ///
  /// ```
  /// use spindle::Provider;
  ///
  /// trait Codec: Send + Sync {}
  /// trait Named: Send + Sync {}
  ///
  /// struct Json;
  /// impl Codec for Json {}
  /// impl Named for Json {}
  ///
  /// let _descriptor = Provider::instance(Json)
  ///   .provides::<dyn Codec>(|p| p)
  ///   .provides::<dyn Named>(|p| p);
  /// ```
  pub fn provides<S>(mut self, cast: fn(Arc<T>) -> Arc<S>) -> Self
  where
    S: ?Sized + Any + Send + Sync,
  {
    let thunk: CastFn = Box::new(move |erased| {
      let concrete = Arc::clone(erased).downcast::<T>().ok()?;
      Some(Box::new(cast(concrete)) as Box<dyn Any + Send + Sync>)
    });
    self.inner.casts.insert(TypeId::of::<S>(), thunk);
    self
  }

  /// Finishes the builder, yielding the type-erased descriptor.
  pub fn build(self) -> Provider {
    self.inner
  }
}

impl<T> From<ProviderBuilder<T>> for Provider
where
  T: Any + Send + Sync,
{
  fn from(builder: ProviderBuilder<T>) -> Self {
    builder.inner
  }
}
