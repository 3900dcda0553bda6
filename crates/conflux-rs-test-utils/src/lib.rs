//! Test helpers shared across conflux crates.

pub mod loader;
pub mod model;

pub use loader::{AsyncOnlyLoader, CompoundStubLoader, FailingLoader, LoadLog, StubLoader};
pub use model::{FailingModel, FnModel};
