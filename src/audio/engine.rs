use std::path::Path;
use std::time::Duration;

use crate::error::EngineError;

/// The audio output subsystem as seen by the playback controller.
///
/// Commands are fire-and-forget: none of them waits for the hardware. The
/// engine never calls back; the controller polls `is_busy` and
/// `position_millis` instead.
pub trait AudioEngine {
    /// Prepare `path` for playback, stopping whatever was playing.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    /// Start the loaded track at `start_at` from its beginning.
    fn play(&mut self, start_at: Duration) -> Result<(), EngineError>;
    fn pause(&mut self) -> Result<(), EngineError>;
    fn unpause(&mut self) -> Result<(), EngineError>;
    fn stop(&mut self) -> Result<(), EngineError>;
    /// Set the output gain, `0.0..=1.0`.
    fn set_volume(&mut self, gain: f32) -> Result<(), EngineError>;
    /// Whether audio is currently being produced for the loaded track.
    fn is_busy(&self) -> Result<bool, EngineError>;
    /// Playback position in milliseconds; negative when nothing is playing.
    fn position_millis(&self) -> Result<i64, EngineError>;
}

/// Reads a track's length from its headers.
pub trait DurationProbe {
    /// `None` means the length is unknown and the track is not seekable.
    fn duration(&self, path: &Path) -> Option<Duration>;
}
