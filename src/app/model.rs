use std::path::{Path, PathBuf};

/// What the TUI remembers between frames.
#[derive(Debug, Default)]
pub struct App {
    /// Highlighted row in the track list. Independent of the playlist cursor
    /// until the user activates or selects the row.
    pub cursor: usize,
    pub current_dir: Option<PathBuf>,
    pub metadata_window: bool,
    /// First `g` of a `gg` chord.
    pub pending_g: bool,
}

impl App {
    pub fn new(dir: &Path) -> Self {
        Self {
            current_dir: Some(dir.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Move the cursor down, wrapping at the end of a list of `len` rows.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Move the cursor up, wrapping at the top.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if self.cursor == 0 {
            len - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn top(&mut self) {
        self.cursor = 0;
    }

    pub fn bottom(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk after a rescan.
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.bottom(len);
        }
    }

    /// Put the cursor on the track the controller is now on.
    pub fn follow(&mut self, index: Option<usize>) {
        if let Some(i) = index {
            self.cursor = i;
        }
    }
}
