use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The identity of a contract: a `'static` type, usually a trait object
/// type such as `dyn Codec`, that providers are registered under and
/// looked up by.
///
/// Two `ContractId`s are equal exactly when they identify the same type.
/// The captured type name travels along for diagnostics only and never
/// participates in equality or hashing.
#[derive(Clone, Copy)]
pub struct ContractId {
  type_id: TypeId,
  name: &'static str,
}

impl ContractId {
  /// Returns the identity of contract `S`.
  ///
  /// # Examples
  ///
  /// ```
  /// use spindle::ContractId;
  ///
  /// trait Codec: Send + Sync {}
  ///
  /// let id = ContractId::of::<dyn Codec>();
  /// assert_eq!(id, ContractId::of::<dyn Codec>());
  /// assert_ne!(id, ContractId::of::<String>());
  /// ```
  pub fn of<S: ?Sized + 'static>() -> Self {
    Self {
      type_id: TypeId::of::<S>(),
      name: type_name::<S>(),
    }
  }

  /// The contract's type name as reported by `std::any::type_name`.
  pub fn name(&self) -> &'static str {
    self.name
  }

  pub(crate) fn type_id(&self) -> TypeId {
    self.type_id
  }
}

impl PartialEq for ContractId {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for ContractId {}

impl Hash for ContractId {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for ContractId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ContractId({})", self.name)
  }
}
