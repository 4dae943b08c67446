//! The playback state machine.
//!
//! `PlaybackController` owns the playlist and the `Stopped/Playing/Paused`
//! state, issues every command to the audio engine, and polls the engine
//! through scheduled timers to notice when a track has run out.

mod machine;
mod model;

pub use machine::{PlaybackController, Timing};
pub use model::*;
