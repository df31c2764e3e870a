use spindle::{load, provide_to, Loader, Registry};

// Pipeline steps discovered through the registry.
trait Step: Send + Sync {
  fn run(&self, input: &str) -> String;
}

struct Uppercase;
impl Step for Uppercase {
  fn run(&self, input: &str) -> String {
    input.to_uppercase()
  }
}

struct Exclaim;
impl Step for Exclaim {
  fn run(&self, input: &str) -> String {
    format!("{}!", input)
  }
}

// By accepting a `&Registry`, this function can be driven from a
// controlled environment in tests.
fn run_pipeline(registry: &Registry, input: &str) -> String {
  let steps = Loader::<dyn Step>::load_from(registry).expect("pipeline steps failed to load");
  steps
    .iter()
    .fold(input.to_string(), |acc, step| step.run(&acc))
}

fn main() {
  // --- Scenario with a local registry ---
  println!("--- Running with a local registry ---");
  let local = Registry::new();
  provide_to!(&local, Uppercase: instance Uppercase => [dyn Step = 2]).unwrap();
  provide_to!(&local, Exclaim: instance Exclaim => [dyn Step = 1]).unwrap();

  let result = run_pipeline(&local, "spindle");
  println!("Result: {}", result);
  assert_eq!(result, "SPINDLE!");

  // --- Verify isolation ---
  // The providers registered in `local` do not exist in the global registry.
  let global_steps = load::<dyn Step>().unwrap();
  assert!(
    global_steps.is_empty(),
    "Providers should not have leaked into the global registry!"
  );
  println!("\nVerified that the local registry is isolated from the global one.");
}
