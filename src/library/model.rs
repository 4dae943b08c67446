use std::path::{Path, PathBuf};
use std::time::Duration;

/// A single playable file plus the metadata shown for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Cached duration; `None` until probed, or when the probe failed.
    pub duration: Option<Duration>,
    pub display: String,
}

impl Track {
    /// Build a bare track for `path`, titled after its file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = file_stem(&path);
        Self {
            display: title.clone(),
            path,
            title,
            artist: None,
            album: None,
            duration: None,
        }
    }

    /// File name (with extension) used in status messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display.clone())
    }
}

pub(super) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}
