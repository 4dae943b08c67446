//! Error types.
//!
//! `EngineError` is what the audio engine collaborator reports. The controller
//! never lets those escape: every engine failure is translated into a
//! `PlayerError` at the controller boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Raw failures reported by an audio engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("no track loaded")]
    NothingLoaded,
}

/// Errors surfaced by the playlist and the playback controller.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The playlist has no tracks.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// A track index outside `0..len` was requested.
    #[error("track index {index} out of range (playlist has {len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The engine rejected the file.
    #[error("failed to load {path:?}: {reason}")]
    TrackLoad { path: PathBuf, reason: String },

    /// No track is loaded, or its duration is unknown.
    #[error("seeking is unavailable for the current track")]
    SeekUnavailable,

    /// The engine failed mid-operation.
    #[error("playback error: {0}")]
    Playback(String),

    #[error("invalid volume: {0}")]
    InvalidVolume(String),
}

impl PlayerError {
    pub(crate) fn track_load(path: impl Into<PathBuf>, err: EngineError) -> Self {
        Self::TrackLoad {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

