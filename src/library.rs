//! Folder scanning collaborator.
//!
//! Produces the ordered list of `Track`s that the playlist is rebuilt from.
//! Durations are not read here; the controller probes them lazily.

mod display;
mod model;
mod scan;

pub use display::display_name;
pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
