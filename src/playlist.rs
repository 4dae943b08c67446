//! Ordered track list with a circular "current" cursor.

use crate::error::PlayerError;
use crate::library::Track;

/// Direction for `Playlist::advance`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The tracks of the loaded folder and the index of the current one.
///
/// `current_index < tracks.len()` whenever the playlist is non-empty.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current_index: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut playlist = Self::default();
        playlist.load(tracks);
        playlist
    }

    /// Replace every track and move the cursor back to the first one.
    pub fn load(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current_index = 0;
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Result<&Track, PlayerError> {
        self.tracks
            .get(self.current_index)
            .ok_or(PlayerError::EmptyPlaylist)
    }

    pub(crate) fn current_mut(&mut self) -> Result<&mut Track, PlayerError> {
        self.tracks
            .get_mut(self.current_index)
            .ok_or(PlayerError::EmptyPlaylist)
    }

    /// Move the cursor to `index`. Leaves the cursor untouched on failure.
    pub fn select_index(&mut self, index: usize) -> Result<(), PlayerError> {
        if index >= self.tracks.len() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }
        self.current_index = index;
        Ok(())
    }

    /// Step the cursor one track in `direction`, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.current_index = match direction {
            Direction::Next => (self.current_index + 1) % len,
            Direction::Previous => (self.current_index + len - 1) % len,
        };
    }
}
