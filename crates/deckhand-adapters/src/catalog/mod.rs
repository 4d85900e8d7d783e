//! In-process catalog authority.

pub mod builtin;
mod memory;

pub use memory::{InMemoryCatalog, SimulatedOutcome};
