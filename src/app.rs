//! Terminal view state: list cursor, metadata popup and the directory being
//! shown. Playback state itself lives in the controller.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
