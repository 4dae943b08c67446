use super::*;
use crate::controller::{PLAY_LABEL, Progress};
use ratatui::{Terminal, backend::TestBackend};

fn snapshot(progress: Progress) -> Snapshot {
    Snapshot {
        state: PlaybackState::Stopped,
        current_index: Some(0),
        track_label: "first".to_string(),
        progress,
        slider_enabled: true,
        button_label: PLAY_LABEL,
        status: "Track loaded. Press Play.".to_string(),
        volume: 80.0,
    }
}

fn rendered(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn format_time_pads_minutes_and_seconds() {
    assert_eq!(format_time(Some(Duration::from_secs(0))), "00:00");
    assert_eq!(format_time(Some(Duration::from_millis(65_900))), "01:05");
    assert_eq!(format_time(Some(Duration::from_secs(3600))), "60:00");
}

#[test]
fn format_time_marks_unknown() {
    assert_eq!(format_time(None), "--:--");
}

#[test]
fn gauge_never_echoes_and_empties_when_disabled() {
    let mut bar = GaugeSeekBar::default();
    assert_eq!(bar.set_value(40.0), None);
    assert_eq!(bar.ratio(), 0.0);
    bar.set_enabled(true);
    assert!((bar.ratio() - 0.4).abs() < 1e-9);
    bar.set_value(250.0);
    assert_eq!(bar.ratio(), 1.0);
}

#[test]
fn visible_window_centres_the_cursor() {
    assert_eq!(visible_window(5, 10, 3), (0, 5));
    assert_eq!(visible_window(100, 10, 50), (45, 55));
    assert_eq!(visible_window(100, 10, 98), (90, 100));
    assert_eq!(visible_window(100, 10, 2), (0, 10));
}

#[test]
fn controls_text_uses_configured_steps() {
    let text = controls_text(&ControlsSettings {
        scrub_seconds: 7,
        volume_step: 3.0,
    });
    assert!(text.contains("scrub -/+7s"));
    assert!(text.contains("volume ±3"));
}

#[test]
fn draw_shows_status_and_unknown_times() {
    let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
    let app = App::default();
    let tracks = vec![Track::from_path("/music/first.mp3")];
    let snap = snapshot(Progress::Unknown);
    terminal
        .draw(|f| {
            draw(
                f,
                &app,
                &snap,
                &tracks,
                &GaugeSeekBar::default(),
                &UiSettings::default(),
                &ControlsSettings::default(),
            )
        })
        .unwrap();

    let screen = rendered(&terminal);
    assert!(screen.contains("Track loaded. Press Play."));
    assert!(screen.contains("--:-- / --:--"));
    assert!(screen.contains("first"));
}

#[test]
fn draw_shows_known_times() {
    let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
    let snap = snapshot(Progress::Known {
        position: Duration::from_secs(61),
        duration: Some(Duration::from_secs(180)),
    });
    terminal
        .draw(|f| {
            draw(
                f,
                &App::default(),
                &snap,
                &[],
                &GaugeSeekBar::default(),
                &UiSettings::default(),
                &ControlsSettings::default(),
            )
        })
        .unwrap();

    assert!(rendered(&terminal).contains("01:01 / 03:00"));
}
