use super::*;
use std::sync::mpsc;

fn handle() -> (MprisHandle, Arc<Mutex<SharedState>>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    (
        MprisHandle {
            state: state.clone(),
        },
        state,
    )
}

#[test]
fn set_track_sets_and_clears_shared_state() {
    let (handle, state) = handle();
    let mut track = Track::from_path("/tmp/music/test.mp3");
    track.title = "Test Title".to_string();
    track.duration = Some(Duration::from_micros(1_234_567));

    handle.set_track(Some(&track));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.length_micros, Some(1_234_567));
    }

    handle.set_track(None);
    let s = state.lock().unwrap();
    assert_eq!(s.title, None);
    assert_eq!(s.length_micros, None);
}

#[test]
fn playback_status_follows_controller_state() {
    let (handle, state) = handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    assert_eq!(iface.playback_status(), "Stopped");
    handle.set_playback(PlaybackState::Playing);
    assert_eq!(iface.playback_status(), "Playing");
    handle.set_playback(PlaybackState::Paused);
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_omits_length_when_unknown() {
    let (handle, state) = handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    handle.set_track(Some(&Track::from_path("/tmp/a.mp3")));
    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
    assert!(!map.contains_key("mpris:length"));
}

#[test]
fn player_methods_post_commands() {
    let (_handle, state) = handle();
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();
    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    );
}
