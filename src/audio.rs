//! Audio collaborators: the output engine and the duration probe.
//!
//! The controller only talks to the `AudioEngine` and `DurationProbe`
//! traits; `RodioEngine` and `LoftyProbe` are the implementations used by
//! the binary, tests substitute fakes.

mod engine;
mod output;
mod probe;

pub use engine::{AudioEngine, DurationProbe};
pub use output::RodioEngine;
pub use probe::LoftyProbe;

#[cfg(test)]
mod tests;
