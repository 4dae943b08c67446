use super::event_loop::*;
use super::parse_volume;
use crate::app::App;
use crate::audio::{AudioEngine, DurationProbe};
use crate::config::{ControlsSettings, LibrarySettings};
use crate::controller::{Action, PlaybackController, PlaybackState, Progress, SeekBar, Timing};
use crate::error::EngineError;
use crate::library::Track;
use crate::mpris::ControlCmd;
use crate::scheduler::{Scheduler, Timer};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use std::time::Duration;

#[derive(Default)]
struct SilentEngine {
    stops: usize,
    volume: f32,
}

impl AudioEngine for SilentEngine {
    fn load(&mut self, _path: &Path) -> Result<(), EngineError> {
        Ok(())
    }
    fn play(&mut self, _offset: Duration) -> Result<(), EngineError> {
        Ok(())
    }
    fn pause(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
    fn unpause(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
    fn stop(&mut self) -> Result<(), EngineError> {
        self.stops += 1;
        Ok(())
    }
    fn set_volume(&mut self, volume: f32) -> Result<(), EngineError> {
        self.volume = volume;
        Ok(())
    }
    fn is_busy(&self) -> Result<bool, EngineError> {
        Ok(true)
    }
    fn position_millis(&self) -> Result<i64, EngineError> {
        Ok(0)
    }
}

struct TenSeconds;

impl DurationProbe for TenSeconds {
    fn duration(&self, _path: &Path) -> Option<Duration> {
        Some(Duration::from_secs(10))
    }
}

#[derive(Default)]
struct Discard;

impl Scheduler for Discard {
    fn schedule_after(&mut self, _delay: Duration, _timer: Timer) {}
}

#[derive(Default)]
struct Bar;

impl SeekBar for Bar {
    fn set_value(&mut self, _percent: f64) -> Option<f64> {
        None
    }
    fn set_enabled(&mut self, _enabled: bool) {}
}

fn controller(n: usize) -> PlaybackController<SilentEngine, TenSeconds, Discard, Bar> {
    let mut c = PlaybackController::new(
        SilentEngine::default(),
        TenSeconds,
        Discard,
        Bar,
        Timing::default(),
    );
    let tracks = (0..n)
        .map(|i| Track::from_path(format!("/music/{i}.mp3")))
        .collect();
    c.load_folder(tracks).unwrap();
    c
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn keys_map_to_transport_buttons() {
    let mut app = App::default();
    let controls = ControlsSettings::default();
    assert_eq!(
        command_for_key(key(KeyCode::Char(' ')), &mut app, &controls),
        Some(Command::Button(Action::PlayPause))
    );
    assert_eq!(
        command_for_key(key(KeyCode::Char('s')), &mut app, &controls),
        Some(Command::Button(Action::Stop))
    );
    assert_eq!(
        command_for_key(key(KeyCode::Char('h')), &mut app, &controls),
        Some(Command::Button(Action::Previous))
    );
    assert_eq!(
        command_for_key(key(KeyCode::Char('7')), &mut app, &controls),
        Some(Command::SeekTo(70.0))
    );
    assert_eq!(
        command_for_key(key(KeyCode::Char('L')), &mut app, &controls),
        Some(Command::Scrub(5))
    );
}

#[test]
fn gg_needs_two_presses_in_a_row() {
    let mut app = App::default();
    let controls = ControlsSettings::default();
    assert_eq!(command_for_key(key(KeyCode::Char('g')), &mut app, &controls), None);
    assert_eq!(
        command_for_key(key(KeyCode::Char('g')), &mut app, &controls),
        Some(Command::CursorTop)
    );

    command_for_key(key(KeyCode::Char('g')), &mut app, &controls);
    command_for_key(key(KeyCode::Char('j')), &mut app, &controls);
    assert_eq!(command_for_key(key(KeyCode::Char('g')), &mut app, &controls), None);
}

#[test]
fn scrub_target_is_relative_and_clamped() {
    let progress = Progress::Known {
        position: Duration::from_secs(30),
        duration: Some(Duration::from_secs(100)),
    };
    assert_eq!(scrub_target(progress, 5), Some(35.0));
    assert_eq!(scrub_target(progress, -60), Some(0.0));
    assert_eq!(scrub_target(progress, 500), Some(100.0));
    assert_eq!(scrub_target(Progress::Unknown, 5), None);
    let no_duration = Progress::Known {
        position: Duration::ZERO,
        duration: None,
    };
    assert_eq!(scrub_target(no_duration, 5), None);
}

#[test]
fn remote_play_and_pause_respect_current_state() {
    assert_eq!(command_for_control(ControlCmd::Play, PlaybackState::Playing), None);
    assert_eq!(
        command_for_control(ControlCmd::Play, PlaybackState::Paused),
        Some(Command::Button(Action::PlayPause))
    );
    assert_eq!(command_for_control(ControlCmd::Pause, PlaybackState::Stopped), None);
    assert_eq!(
        command_for_control(ControlCmd::Pause, PlaybackState::Playing),
        Some(Command::Button(Action::PlayPause))
    );
    assert_eq!(
        command_for_control(ControlCmd::Prev, PlaybackState::Stopped),
        Some(Command::Button(Action::Previous))
    );
    assert_eq!(
        command_for_control(ControlCmd::Quit, PlaybackState::Stopped),
        Some(Command::Quit)
    );
}

#[test]
fn activate_plays_the_track_under_the_cursor() {
    let mut c = controller(3);
    let mut app = App::default();
    let lib = LibrarySettings::default();

    assert!(!apply(Command::CursorBottom, &mut c, &mut app, &lib));
    assert_eq!(app.cursor, 2);
    apply(Command::Activate, &mut c, &mut app, &lib);
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.playlist().current_index(), 2);
}

#[test]
fn volume_steps_are_clamped_by_the_controller() {
    let mut c = controller(1);
    let mut app = App::default();
    let lib = LibrarySettings::default();

    apply(Command::Volume(5.0), &mut c, &mut app, &lib);
    assert_eq!(c.volume(), 100.0);
    apply(Command::Volume(-30.0), &mut c, &mut app, &lib);
    assert_eq!(c.volume(), 70.0);
    assert!((c.engine().volume - 0.7).abs() < 1e-6);
}

#[test]
fn quit_stops_the_engine() {
    let mut c = controller(1);
    let mut app = App::default();
    let before = c.engine().stops;
    assert!(apply(Command::Quit, &mut c, &mut app, &LibrarySettings::default()));
    assert_eq!(c.engine().stops, before + 1);
}

#[test]
fn rescan_reloads_the_current_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
    std::fs::write(dir.path().join("b.flac"), b"").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

    let mut c = controller(5);
    let mut app = App::new(dir.path());
    app.cursor = 4;
    apply(Command::Rescan, &mut c, &mut app, &LibrarySettings::default());
    assert_eq!(c.playlist().len(), 2);
    assert_eq!(app.cursor, 0);
    assert_eq!(c.state(), PlaybackState::Stopped);
}

#[test]
fn volume_flag_accepts_only_finite_percentages() {
    assert_eq!(parse_volume("80"), Ok(80.0));
    assert_eq!(parse_volume(" 0 "), Ok(0.0));
    assert_eq!(parse_volume("100"), Ok(100.0));
    assert!(parse_volume("NaN").is_err());
    assert!(parse_volume("inf").is_err());
    assert!(parse_volume("101").is_err());
    assert!(parse_volume("-1").is_err());
    assert!(parse_volume("loud").is_err());
}
