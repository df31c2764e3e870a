//! # Spindle
//!
//! A thread-safe service provider registry and loader for Rust.
//!
//! Providers are registered under the *contracts* they serve, usually
//! trait object types, each with a priority. Consumers load the finalized
//! provider list for a contract and walk it highest priority first.
//! Registration normally happens once during startup; loads then run
//! concurrently for the rest of the process.
//!
//! ## Core Concepts
//!
//! * **Contract**: a `'static` type, usually `dyn Trait`, identified by a
//!   [`ContractId`]. Providers are registered under contracts and looked
//!   up by them.
//! * **Provider Descriptor**: a [`Provider`] records how to obtain an
//!   instance (`instance`, `singleton` or `transient`) together with the
//!   compile-time-checked conversions to each contract it serves.
//! * **Registry**: a [`Registry`] maps contract identities to ordered
//!   provider lists. A process-wide instance is available through
//!   [`global`].
//! * **Loader**: a [`Loader`] resolves every provider of one contract into
//!   shared `Arc<S>` handles, ordered by descending priority.
//!
//! ## Quick Start
//!
//! ```rust
//! use spindle::{load, provide};
//!
//! trait Codec: Send + Sync {
//!   fn name(&self) -> &'static str;
//! }
//!
//! #[derive(Default)]
//! struct Json;
//! impl Codec for Json {
//!   fn name(&self) -> &'static str {
//!     "json"
//!   }
//! }
//!
//! #[derive(Default)]
//! struct MsgPack;
//! impl Codec for MsgPack {
//!   fn name(&self) -> &'static str {
//!     "msgpack"
//!   }
//! }
//!
//! fn main() {
//!   // Discovery, usually run once at startup.
//!   provide!(Json: singleton Json::default => [dyn Codec = 10]).unwrap();
//!   provide!(MsgPack: singleton MsgPack::default => [dyn Codec = 20]).unwrap();
//!
//!   // Consumption, highest priority first.
//!   let codecs = load::<dyn Codec>().unwrap();
//!   let names: Vec<_> = codecs.iter().map(|codec| codec.name()).collect();
//!   assert_eq!(names, ["msgpack", "json"]);
//! }
//! ```

mod contract;
mod descriptor;
mod error;
mod global;
mod loader;
mod macros;
mod registry;

pub use contract::ContractId;
pub use descriptor::{Provider, ProviderBuilder};
pub use error::{BoxError, Error, Result};
pub use global::global;
pub use loader::Loader;
pub use registry::{Registration, Registry};

use std::any::Any;

/// Loads the ordered provider list for contract `S` from the global
/// registry. Shorthand for [`Loader::load`].
pub fn load<S>() -> Result<Loader<S>>
where
  S: ?Sized + Any + Send + Sync,
{
  Loader::load()
}
