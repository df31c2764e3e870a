//! Public macros for ergonomic provider registration.

/// Registers a provider in an explicit [`Registry`](crate::Registry).
///
/// The general shape is
/// `provide_to!(registry, Concrete: lifetime factory => [contracts...])`
/// where `lifetime` is one of `singleton`, `transient` or `instance`, and
/// each contract optionally carries an `= priority` suffix (default 0).
/// The conversions to every listed contract are checked at compile time,
/// so a provider cannot be declared under a contract it does not
/// implement.
///
/// Evaluates to the `Result` of [`Registry::register`](crate::Registry::register).
///
/// # Examples
///
/// ```
/// use spindle::{provide_to, Loader, Registry};
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
/// struct Toml;
/// impl Codec for Toml {
///   fn name(&self) -> &'static str {
///     "toml"
///   }
/// }
///
/// let registry = Registry::new();
/// provide_to!(&registry, Json: singleton || Json => [dyn Codec = 10]).unwrap();
/// provide_to!(&registry, Toml: instance Toml => [dyn Codec]).unwrap();
///
/// let codecs = Loader::<dyn Codec>::load_from(&registry).unwrap();
/// let names: Vec<_> = codecs.iter().map(|codec| codec.name()).collect();
/// assert_eq!(names, ["json", "toml"]);
/// ```
#[macro_export]
macro_rules! provide_to {
  ($registry:expr, $ty:ty : singleton $factory:expr => [$($contract:ty $(= $priority:expr)?),+ $(,)?]) => {
    $registry.register(
      $crate::Provider::singleton::<$ty, _>($factory)$(.provides::<$contract>(|p| p))+,
      &[$($crate::ContractId::of::<$contract>()),+],
      &[$($crate::__priority!($($priority)?)),+],
    )
  };
  ($registry:expr, $ty:ty : transient $factory:expr => [$($contract:ty $(= $priority:expr)?),+ $(,)?]) => {
    $registry.register(
      $crate::Provider::transient::<$ty, _>($factory)$(.provides::<$contract>(|p| p))+,
      &[$($crate::ContractId::of::<$contract>()),+],
      &[$($crate::__priority!($($priority)?)),+],
    )
  };
  ($registry:expr, $ty:ty : instance $value:expr => [$($contract:ty $(= $priority:expr)?),+ $(,)?]) => {
    $registry.register(
      $crate::Provider::instance::<$ty>($value)$(.provides::<$contract>(|p| p))+,
      &[$($crate::ContractId::of::<$contract>()),+],
      &[$($crate::__priority!($($priority)?)),+],
    )
  };
}

/// Registers a provider in the [`global`](crate::global) registry.
///
/// Accepts the same forms as [`provide_to!`], without the leading registry
/// argument.
///
/// # Examples
///
/// ```
/// use spindle::{load, provide};
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     "hello".to_string()
///   }
/// }
///
/// provide!(English: singleton English::default => [dyn Greeter = 5]).unwrap();
///
/// let greeters = load::<dyn Greeter>().unwrap();
/// assert_eq!(greeters.list()[0].greet(), "hello");
/// ```
#[macro_export]
macro_rules! provide {
  ($ty:ty : singleton $factory:expr => [$($contract:ty $(= $priority:expr)?),+ $(,)?]) => {
    $crate::provide_to!($crate::global(), $ty : singleton $factory => [$($contract $(= $priority)?),+])
  };
  ($ty:ty : transient $factory:expr => [$($contract:ty $(= $priority:expr)?),+ $(,)?]) => {
    $crate::provide_to!($crate::global(), $ty : transient $factory => [$($contract $(= $priority)?),+])
  };
  ($ty:ty : instance $value:expr => [$($contract:ty $(= $priority:expr)?),+ $(,)?]) => {
    $crate::provide_to!($crate::global(), $ty : instance $value => [$($contract $(= $priority)?),+])
  };
}

// Expands one contract's optional `= priority` suffix to its value, or 0
// when absent.
#[doc(hidden)]
#[macro_export]
macro_rules! __priority {
  () => {
    0
  };
  ($priority:expr) => {
    $priority
  };
}
