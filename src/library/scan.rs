use std::borrow::Cow;
use std::io;
use std::path::Path;

use lofty::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_name;
use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn non_empty(v: Option<Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Fill title/artist/album from the file's tags, keeping the file-stem title
/// when the file has none (or cannot be parsed at all).
fn read_tags(track: &mut Track) {
    let tagged = match lofty::read_from_path(&track.path) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %track.path.display(), error = %e, "no readable tags");
            return;
        }
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return;
    };

    if let Some(title) = non_empty(tag.title()) {
        track.title = title;
    }
    track.artist = non_empty(tag.artist());
    track.album = non_empty(tag.album());
}

/// List the audio files under `dir`.
///
/// Order is whatever the directory walk yields unless `settings.sort` asks
/// for a case-insensitive sort on the display name. Fails only when `dir`
/// itself cannot be read.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> io::Result<Vec<Track>> {
    std::fs::read_dir(dir)?;

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let mut track = Track::from_path(path);
        read_tags(&mut track);
        track.display = display_name(
            &track,
            &settings.display_fields,
            &settings.display_separator,
        );
        tracks.push(track);
    }

    if settings.sort {
        tracks.sort_by_key(|t| t.display.to_lowercase());
    }
    debug!(dir = %dir.display(), count = tracks.len(), "scanned folder");
    Ok(tracks)
}
