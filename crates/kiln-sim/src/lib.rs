//! Host-side deterministic plant simulator and end-to-end test harness for
//! the kiln firing controller core. Mirrors the reference workspace's `sim`
//! crate: an in-process fake standing in for hardware so firmware-level
//! scenarios can run in CI without a board attached.

pub mod fakes;
pub mod harness;
pub mod plant;

pub use harness::{SimHarness, TraceEntry};
