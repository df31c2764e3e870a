use spindle::{load, provide};

// 1. Define the contract (the trait providers are registered under)
trait Codec: Send + Sync {
  fn name(&self) -> &'static str;
  fn encode(&self, input: &str) -> String;
}

// 2. Define concrete providers
struct JsonCodec;
impl Codec for JsonCodec {
  fn name(&self) -> &'static str {
    "json"
  }
  fn encode(&self, input: &str) -> String {
    format!("{{\"value\":\"{}\"}}", input)
  }
}

struct PlainCodec;
impl Codec for PlainCodec {
  fn name(&self) -> &'static str {
    "plain"
  }
  fn encode(&self, input: &str) -> String {
    input.to_string()
  }
}

fn main() {
  // --- Discovery ---
  // Each provider declares the contract it serves and a priority. The
  // conversion to `dyn Codec` is checked at compile time.
  provide!(JsonCodec: singleton || JsonCodec => [dyn Codec = 10]).unwrap();
  provide!(PlainCodec: singleton || PlainCodec => [dyn Codec = 1]).unwrap();

  // --- Consumption ---
  let codecs = load::<dyn Codec>().unwrap();
  println!("Loaded {} codecs, preferred first:", codecs.len());
  for codec in &codecs {
    println!("  - {}", codec.name());
  }

  // The first entry is the highest-priority provider.
  let preferred = &codecs.list()[0];
  println!(
    "Encoding with `{}`: {}",
    preferred.name(),
    preferred.encode("spindle")
  );
  assert_eq!(preferred.name(), "json");
}
