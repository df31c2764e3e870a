use spindle::{provide_to, Loader, Registry};

// A middleware-style contract where order matters.
trait Middleware: Send + Sync {
  fn name(&self) -> &'static str;
}

struct Auth;
impl Middleware for Auth {
  fn name(&self) -> &'static str {
    "auth"
  }
}

struct Logging;
impl Middleware for Logging {
  fn name(&self) -> &'static str {
    "logging"
  }
}

struct Compression;
impl Middleware for Compression {
  fn name(&self) -> &'static str {
    "compression"
  }
}

fn main() {
  let registry = Registry::new();

  // Registration order is deliberately scrambled; priorities decide the
  // final chain. A contract without `= priority` defaults to 0.
  provide_to!(&registry, Logging: instance Logging => [dyn Middleware = 10]).unwrap();
  provide_to!(&registry, Compression: instance Compression => [dyn Middleware]).unwrap();
  provide_to!(&registry, Auth: instance Auth => [dyn Middleware = 100]).unwrap();

  let chain = Loader::<dyn Middleware>::load_from(&registry).unwrap();
  println!("Middleware chain, highest priority first:");
  for (index, middleware) in chain.iter().enumerate() {
    println!("  {}. {}", index + 1, middleware.name());
  }

  let names: Vec<_> = chain.iter().map(|m| m.name()).collect();
  assert_eq!(names, ["auth", "logging", "compression"]);
}
