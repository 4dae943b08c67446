use crate::config::TrackDisplayField;

use super::model::Track;

/// Compose the list label for `track` from the configured `fields`.
///
/// Empty or missing fields are skipped; when nothing is left the title is used.
pub fn display_name(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|field| {
            let value = match field {
                TrackDisplayField::Title => Some(track.title.clone()),
                TrackDisplayField::Artist => track.artist.clone(),
                TrackDisplayField::Album => track.album.clone(),
                TrackDisplayField::Filename => Some(super::model::file_stem(&track.path)),
                TrackDisplayField::Path => Some(track.path.display().to_string()),
            }?;
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect();

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
