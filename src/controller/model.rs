//! Types exchanged between the controller and whatever presents it.

use std::fmt;
use std::time::Duration;

pub const PLAY_LABEL: &str = "▶ Play";
pub const PAUSE_LABEL: &str = "⏸ Pause";

/// The playback state of the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Stopped => write!(f, "Stopped"),
            PlaybackState::Playing => write!(f, "Playing"),
            PlaybackState::Paused => write!(f, "Paused"),
        }
    }
}

/// Transport buttons. One play/pause button is enough for the UI: the
/// controller decides which of its methods it means from the current state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    PlayPause,
    Stop,
    Next,
    Previous,
}

/// Result of a request arriving through the seek bar channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeekOutcome {
    /// The request came from a user and the engine was repositioned.
    Applied,
    /// The request was the echo of a programmatic display update.
    Suppressed,
}

/// Elapsed/total time for display.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Progress {
    /// Nothing is loaded. Rendered distinctly from a genuine zero position.
    Unknown,
    Known {
        position: Duration,
        duration: Option<Duration>,
    },
}

impl Progress {
    /// Position as a percentage of a known, positive duration.
    pub fn percent(&self) -> Option<f64> {
        match *self {
            Progress::Known {
                position,
                duration: Some(d),
            } if !d.is_zero() => Some(position.as_secs_f64() / d.as_secs_f64() * 100.0),
            _ => None,
        }
    }
}

/// The progress slider: a display of the position that is also the input
/// for seek requests.
pub trait SeekBar {
    /// Move the bar to `percent`.
    ///
    /// A widget that notifies its listener on every value change, programmatic
    /// or not, returns the notified value here; the controller routes it into
    /// its seek handler just like a user drag.
    fn set_value(&mut self, percent: f64) -> Option<f64>;

    fn set_enabled(&mut self, enabled: bool);
}

/// Everything the UI needs to render the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub state: PlaybackState,
    pub current_index: Option<usize>,
    pub track_label: String,
    pub progress: Progress,
    pub slider_enabled: bool,
    pub button_label: &'static str,
    pub status: String,
    /// Volume in percent.
    pub volume: f64,
}

impl Snapshot {
    pub fn position(&self) -> Option<Duration> {
        match self.progress {
            Progress::Known { position, .. } => Some(position),
            Progress::Unknown => None,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match self.progress {
            Progress::Known { duration, .. } => duration,
            Progress::Unknown => None,
        }
    }
}
