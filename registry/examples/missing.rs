use spindle::{load, ContractId, Error, Loader, Provider, Registry};

trait Exporter: Send + Sync {}
trait Importer: Send + Sync {}

struct CsvExporter;
impl Exporter for CsvExporter {}
impl Importer for CsvExporter {}

fn main() {
  // --- A contract nobody registered for ---
  println!("Loading a contract that has no providers...");
  let importers = load::<dyn Importer>().unwrap();
  assert!(importers.is_empty());
  println!(
    "Correctly received an empty loader ({} providers).",
    importers.len()
  );

  // --- A contract the provider never declared ---
  // CsvExporter implements Importer, but its descriptor only declares
  // Exporter; loading it as an Importer is a contract mismatch.
  let registry = Registry::new();
  registry
    .register(
      Provider::instance(CsvExporter).provides::<dyn Exporter>(|p| p),
      &[
        ContractId::of::<dyn Exporter>(),
        ContractId::of::<dyn Importer>(),
      ],
      &[],
    )
    .unwrap();

  match Loader::<dyn Importer>::load_from(&registry) {
    Err(err @ Error::ContractMismatch { .. }) => {
      println!("\nCorrectly rejected the undeclared contract:\n  {}", err);
    }
    other => panic!("Expected a contract mismatch, got {:?}", other.map(|l| l.len())),
  }
}
