//! Platform abstraction layer
//!
//! Host bindings that feed input events into the simulation and read
//! snapshots back out. The simulation itself never depends on these.

#[cfg(target_arch = "wasm32")]
pub mod web;
