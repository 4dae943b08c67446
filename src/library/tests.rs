use super::{Track, display_name};
use crate::config::TrackDisplayField;

fn tagged() -> Track {
    Track {
        artist: Some("  Artist ".into()),
        album: Some(String::new()),
        title: "Song".into(),
        ..Track::from_path("/music/01 song.mp3")
    }
}

#[test]
fn display_name_joins_present_fields_in_order() {
    let t = tagged();
    assert_eq!(
        display_name(&t, &[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_name(&t, &[TrackDisplayField::Album, TrackDisplayField::Filename], "::"),
        "01 song"
    );
}

#[test]
fn display_name_falls_back_to_title() {
    let t = Track {
        title: "Fallback".into(),
        ..Track::from_path("/music/x.mp3")
    };
    assert_eq!(display_name(&t, &[TrackDisplayField::Artist], " - "), "Fallback");
    assert_eq!(display_name(&t, &[], " - "), "Fallback");
}

#[test]
fn from_path_titles_track_after_file_stem() {
    let t = Track::from_path("/music/b.mp3");
    assert_eq!(t.title, "b");
    assert_eq!(t.display, "b");
    assert_eq!(t.file_name(), "b.mp3");
    assert_eq!(t.duration, None);
}
