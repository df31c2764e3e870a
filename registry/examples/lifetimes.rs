use spindle::{load, provide};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A provider that receives a unique ID upon construction.
trait Tracker: Send + Sync {
  fn id(&self) -> usize;
}

struct SingletonTracker {
  id: usize,
}
impl Tracker for SingletonTracker {
  fn id(&self) -> usize {
    self.id
  }
}

struct TransientTracker {
  id: usize,
}
impl Tracker for TransientTracker {
  fn id(&self) -> usize {
    self.id
  }
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  // --- Registration ---
  // The singleton factory runs ONCE, on the first load.
  provide!(SingletonTracker: singleton || {
    println!("Constructing the SINGLETON tracker...");
    SingletonTracker { id: ID_COUNTER.fetch_add(1, Ordering::SeqCst) }
  } => [dyn Tracker = 10])
  .unwrap();

  // The transient factory runs on EVERY load.
  provide!(TransientTracker: transient || {
    println!("Constructing a TRANSIENT tracker...");
    TransientTracker { id: ID_COUNTER.fetch_add(1, Ordering::SeqCst) }
  } => [dyn Tracker = 1])
  .unwrap();

  println!("--- First load ---");
  let first = load::<dyn Tracker>().unwrap();
  println!("--- Second load ---");
  let second = load::<dyn Tracker>().unwrap();

  // The singleton (priority 10, first in the list) keeps its identity.
  assert!(
    Arc::ptr_eq(&first.list()[0], &second.list()[0]),
    "Singleton instances should be identical"
  );
  assert_eq!(first.list()[0].id(), second.list()[0].id());

  // The transient (priority 1, second in the list) is rebuilt per load.
  assert!(
    !Arc::ptr_eq(&first.list()[1], &second.list()[1]),
    "Transient instances should be different"
  );
  println!(
    "Singleton ID stayed {}; transient IDs were {} then {}.",
    first.list()[0].id(),
    first.list()[1].id(),
    second.list()[1].id()
  );
}
