use spindle::{global, load, ContractId, Error, Loader, Provider, Registry};
use std::sync::Arc;

// --- Test Fixtures ---

// Contracts must be Send + Sync for the registry to accept their providers.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

// A simple struct used as a concrete-type contract.
#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

// --- Basic Tests ---

#[test]
fn test_singleton_provider_resolves_to_one_instance() {
  // Arrange
  let registry = Registry::new();
  registry
    .register(
      Provider::singleton(|| EnglishGreeter).provides::<dyn Greeter>(|p| p),
      &[ContractId::of::<dyn Greeter>()],
      &[],
    )
    .unwrap();

  // Act
  let first = Loader::<dyn Greeter>::load_from(&registry).unwrap();
  let second = Loader::<dyn Greeter>::load_from(&registry).unwrap();

  // Assert
  assert_eq!(first.list()[0].greet(), "Hello!");
  // The same instance is observed across independent loads.
  assert!(Arc::ptr_eq(&first.list()[0], &second.list()[0]));
}

#[test]
fn test_transient_provider_resolves_fresh_instances() {
  // Arrange
  struct TransientGreeter;
  impl Greeter for TransientGreeter {
    fn greet(&self) -> String {
      "Hi!".to_string()
    }
  }
  let registry = Registry::new();
  registry
    .register(
      Provider::transient(|| TransientGreeter).provides::<dyn Greeter>(|p| p),
      &[ContractId::of::<dyn Greeter>()],
      &[],
    )
    .unwrap();

  // Act
  let first = Loader::<dyn Greeter>::load_from(&registry).unwrap();
  let second = Loader::<dyn Greeter>::load_from(&registry).unwrap();

  // Assert
  assert_eq!(first.list()[0].greet(), "Hi!");
  // Each load constructed its own instance.
  assert!(!Arc::ptr_eq(&first.list()[0], &second.list()[0]));
}

#[test]
fn test_instance_provider_returns_the_given_object() {
  // Arrange
  let registry = Registry::new();
  registry
    .register(
      Provider::instance(SimpleService { id: 101 }).provides::<SimpleService>(|p| p),
      &[ContractId::of::<SimpleService>()],
      &[],
    )
    .unwrap();

  // Act
  let first = Loader::<SimpleService>::load_from(&registry).unwrap();
  let second = Loader::<SimpleService>::load_from(&registry).unwrap();

  // Assert
  assert_eq!(*first.list()[0], SimpleService { id: 101 });
  assert!(Arc::ptr_eq(&first.list()[0], &second.list()[0]));
}

#[test]
fn test_unregistered_contract_yields_empty_loader() {
  // Arrange
  trait NeverRegistered: Send + Sync {}
  let registry = Registry::new();

  // Act
  let loaded = Loader::<dyn NeverRegistered>::load_from(&registry).unwrap();

  // Assert
  assert!(loaded.is_empty());
  assert_eq!(loaded.len(), 0);
  assert!(loaded.list().is_empty());
  assert!(loaded.iter().next().is_none());
}

#[test]
fn test_register_with_no_contracts_is_rejected() {
  // Arrange
  let registry = Registry::new();

  // Act
  let result = registry.register(
    Provider::instance(SimpleService { id: 1 }).provides::<SimpleService>(|p| p),
    &[],
    &[],
  );

  // Assert
  let err = result.unwrap_err();
  assert!(matches!(err, Error::InvalidDescriptor { .. }));
  assert!(err.to_string().contains("SimpleService"));
}

#[test]
fn test_duplicate_registrations_are_kept() {
  // Registering the same provider type twice yields two independent
  // descriptors, each with its own singleton cell.
  let registry = Registry::new();
  for _ in 0..2 {
    registry
      .register(
        Provider::singleton(|| EnglishGreeter).provides::<dyn Greeter>(|p| p),
        &[ContractId::of::<dyn Greeter>()],
        &[],
      )
      .unwrap();
  }

  // Act
  let greeters = Loader::<dyn Greeter>::load_from(&registry).unwrap();

  // Assert
  assert_eq!(greeters.len(), 2);
  assert!(!Arc::ptr_eq(&greeters.list()[0], &greeters.list()[1]));
}

#[test]
fn test_descriptor_kind_is_reported() {
  // Arrange
  let instance = Provider::instance(SimpleService { id: 1 }).build();
  let singleton = Provider::singleton(|| SimpleService { id: 2 }).build();
  let transient = Provider::transient(|| SimpleService { id: 3 }).build();

  // Assert
  assert!(instance.is_singleton());
  assert!(singleton.is_singleton());
  assert!(!transient.is_singleton());
  assert!(format!("{:?}", transient).contains("transient"));
}

#[test]
fn test_loader_iteration_restarts_at_the_front() {
  // Arrange
  let registry = Registry::new();
  registry
    .register(
      Provider::instance(EnglishGreeter).provides::<dyn Greeter>(|p| p),
      &[ContractId::of::<dyn Greeter>()],
      &[],
    )
    .unwrap();
  let greeters = Loader::<dyn Greeter>::load_from(&registry).unwrap();

  // Act
  let first_pass: Vec<String> = greeters.iter().map(|g| g.greet()).collect();
  let second_pass: Vec<String> = greeters.iter().map(|g| g.greet()).collect();

  // Assert
  assert_eq!(first_pass, ["Hello!"]);
  assert_eq!(first_pass, second_pass);
  // The borrowed IntoIterator form walks the same list.
  let mut seen = 0;
  for greeter in &greeters {
    assert_eq!(greeter.greet(), "Hello!");
    seen += 1;
  }
  assert_eq!(seen, 1);
}

#[test]
fn test_loader_equality_follows_the_contract() {
  // Arrange: two registries with different contents for the same contract.
  let populated = Registry::new();
  populated
    .register(
      Provider::instance(EnglishGreeter).provides::<dyn Greeter>(|p| p),
      &[ContractId::of::<dyn Greeter>()],
      &[],
    )
    .unwrap();
  let empty = Registry::new();

  // Act
  let from_populated = Loader::<dyn Greeter>::load_from(&populated).unwrap();
  let from_empty = Loader::<dyn Greeter>::load_from(&empty).unwrap();

  // Assert
  // Loaders of the same contract are equal regardless of their contents.
  assert_eq!(from_populated, from_empty);
  assert!(format!("{:?}", from_populated).contains("Greeter"));
  let mut set = std::collections::HashSet::new();
  set.insert(from_populated);
  set.insert(from_empty);
  assert_eq!(set.len(), 1);
}

#[test]
fn test_loader_reports_its_contract() {
  // Arrange
  let registry = Registry::new();

  // Act
  let greeters = Loader::<dyn Greeter>::load_from(&registry).unwrap();
  let services = Loader::<SimpleService>::load_from(&registry).unwrap();

  // Assert
  assert_eq!(greeters.contract(), ContractId::of::<dyn Greeter>());
  assert_ne!(greeters.contract(), services.contract());
}

#[test]
fn test_global_registry_and_load_shorthand() {
  // Arrange
  // A unique contract keeps this test isolated from others sharing the
  // global registry.
  trait StartupHook: Send + Sync {
    fn order(&self) -> i32;
  }
  struct MigrateDatabase;
  impl StartupHook for MigrateDatabase {
    fn order(&self) -> i32 {
      1
    }
  }
  global()
    .register(
      Provider::instance(MigrateDatabase).provides::<dyn StartupHook>(|p| p),
      &[ContractId::of::<dyn StartupHook>()],
      &[],
    )
    .unwrap();

  // Act
  let hooks = load::<dyn StartupHook>().unwrap();

  // Assert
  assert_eq!(hooks.len(), 1);
  assert_eq!(hooks.list()[0].order(), 1);
}
