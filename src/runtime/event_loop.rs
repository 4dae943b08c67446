use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::audio::{AudioEngine, DurationProbe};
use crate::config::{self, ControlsSettings};
use crate::controller::{Action, PlaybackController, PlaybackState, Progress, SeekBar};
use crate::error::PlayerError;
use crate::library::scan;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::Player;
use crate::runtime::mpris_sync::update_mpris;
use crate::scheduler::{Scheduler, TimerQueue};
use crate::ui;

/// Longest wait for input before due timers are checked again.
const MAX_POLL: Duration = Duration::from_millis(50);

/// What a key press asks for, independent of the controller it is applied to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Quit,
    Button(Action),
    /// Play the track under the cursor.
    Activate,
    /// Make the track under the cursor current without playing it.
    Select,
    Rescan,
    /// Relative seek by this many seconds.
    Scrub(i64),
    /// Absolute seek to this percent of the track.
    SeekTo(f64),
    /// Change the volume by this many percent.
    Volume(f64),
    CursorNext,
    CursorPrev,
    CursorTop,
    CursorBottom,
    ToggleMetadata,
}

/// Translate a key press, tracking the `gg` chord in `app`.
pub fn command_for_key(key: KeyEvent, app: &mut App, controls: &ControlsSettings) -> Option<Command> {
    let pending_g = std::mem::take(&mut app.pending_g);
    let scrub = controls.scrub_seconds.min(i64::MAX as u64) as i64;
    let cmd = match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('p') | KeyCode::Char(' ') => Command::Button(Action::PlayPause),
        KeyCode::Char('s') => Command::Button(Action::Stop),
        KeyCode::Char('l') => Command::Button(Action::Next),
        KeyCode::Char('h') => Command::Button(Action::Previous),
        KeyCode::Char('L') => Command::Scrub(scrub),
        KeyCode::Char('H') => Command::Scrub(-scrub),
        KeyCode::Char(c @ '0'..='9') => Command::SeekTo(f64::from(c as u8 - b'0') * 10.0),
        KeyCode::Char('+') | KeyCode::Char('=') => Command::Volume(controls.volume_step),
        KeyCode::Char('-') => Command::Volume(-controls.volume_step),
        KeyCode::Enter => Command::Activate,
        KeyCode::Char('v') => Command::Select,
        KeyCode::Char('o') => Command::Rescan,
        KeyCode::Char('j') | KeyCode::Down => Command::CursorNext,
        KeyCode::Char('k') | KeyCode::Up => Command::CursorPrev,
        KeyCode::Char('G') => Command::CursorBottom,
        KeyCode::Char('g') if pending_g => Command::CursorTop,
        KeyCode::Char('g') => {
            app.pending_g = true;
            return None;
        }
        KeyCode::Char('K') => Command::ToggleMetadata,
        _ => return None,
    };
    Some(cmd)
}

/// Target percent for a relative seek of `delta_secs` from the current position.
pub fn scrub_target(progress: Progress, delta_secs: i64) -> Option<f64> {
    let Progress::Known {
        position,
        duration: Some(duration),
    } = progress
    else {
        return None;
    };
    if duration.is_zero() {
        return None;
    }
    let target = position.as_secs_f64() + delta_secs as f64;
    Some((target / duration.as_secs_f64() * 100.0).clamp(0.0, 100.0))
}

pub fn command_for_control(cmd: ControlCmd, state: PlaybackState) -> Option<Command> {
    let cmd = match cmd {
        ControlCmd::Quit => Command::Quit,
        ControlCmd::PlayPause => Command::Button(Action::PlayPause),
        ControlCmd::Play if state == PlaybackState::Playing => return None,
        ControlCmd::Play => Command::Button(Action::PlayPause),
        ControlCmd::Pause if state == PlaybackState::Playing => Command::Button(Action::PlayPause),
        ControlCmd::Pause => return None,
        ControlCmd::Stop => Command::Button(Action::Stop),
        ControlCmd::Next => Command::Button(Action::Next),
        ControlCmd::Prev => Command::Button(Action::Previous),
    };
    Some(cmd)
}

/// Apply `cmd`. Returns `Ok(true)` when the player should shut down.
///
/// Controller errors have already been logged and turned into status text by
/// the controller, so they are only traced here.
pub fn apply<E, P, S, B>(
    cmd: Command,
    controller: &mut PlaybackController<E, P, S, B>,
    app: &mut App,
    library: &config::LibrarySettings,
) -> bool
where
    E: AudioEngine,
    P: DurationProbe,
    S: Scheduler,
    B: SeekBar,
{
    let len = controller.playlist().len();
    let result: Result<(), PlayerError> = match cmd {
        Command::Quit => {
            if let Err(e) = controller.stop() {
                debug!(error = %e, "stop on quit failed");
            }
            return true;
        }
        Command::Button(action) => controller.button_pressed(action),
        Command::Activate => controller.activate_track(app.cursor),
        Command::Select => controller.select_track(app.cursor),
        Command::Rescan => {
            rescan(controller, app, library);
            Ok(())
        }
        Command::Scrub(delta) => match scrub_target(controller.progress(), delta) {
            Some(percent) => controller.request_seek(percent).map(|_| ()),
            None => Err(PlayerError::SeekUnavailable),
        },
        Command::SeekTo(percent) => controller.request_seek(percent).map(|_| ()),
        Command::Volume(delta) => controller.set_volume(controller.volume() + delta),
        Command::CursorNext => {
            app.next(len);
            Ok(())
        }
        Command::CursorPrev => {
            app.prev(len);
            Ok(())
        }
        Command::CursorTop => {
            app.top();
            Ok(())
        }
        Command::CursorBottom => {
            app.bottom(len);
            Ok(())
        }
        Command::ToggleMetadata => {
            app.toggle_metadata_window();
            Ok(())
        }
    };
    if let Err(e) = result {
        debug!(?cmd, error = %e, "command rejected");
    }
    false
}

fn rescan<E, P, S, B>(
    controller: &mut PlaybackController<E, P, S, B>,
    app: &mut App,
    library: &config::LibrarySettings,
) where
    E: AudioEngine,
    P: DurationProbe,
    S: Scheduler,
    B: SeekBar,
{
    let Some(dir) = app.current_dir.clone() else {
        return;
    };
    let tracks = match scan(Path::new(&dir), library) {
        Ok(tracks) => tracks,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "rescan failed");
            return;
        }
    };
    info!(dir = %dir.display(), tracks = tracks.len(), "rescanning folder");
    if let Err(e) = controller.load_folder(tracks) {
        debug!(error = %e, "first track failed to load after rescan");
    }
    app.top();
}

/// Deliver every timer that has come due to the controller.
fn fire_due_timers(player: &mut Player) {
    let now = Instant::now();
    while let Some(timer) = player.scheduler_mut().pop_due(now) {
        if let Err(e) = player.on_timer(timer) {
            debug!(?timer, error = %e, "timer handling failed");
        }
    }
}

fn poll_timeout(queue: &TimerQueue) -> Duration {
    match queue.next_deadline() {
        Some(deadline) => deadline.saturating_duration_since(Instant::now()).min(MAX_POLL),
        None => MAX_POLL,
    }
}

/// Main terminal event loop. Key presses, MPRIS commands and due timers are
/// all applied to `player` on this thread. Returns when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<()> {
    let mut last_published = None;
    loop {
        fire_due_timers(player);

        let snapshot = player.snapshot();
        let published = (snapshot.state, snapshot.current_index);
        if last_published != Some(published) {
            // Follow the playlist when the current track changes under us.
            if last_published.map(|(_, index)| index) != Some(snapshot.current_index) {
                app.follow(snapshot.current_index);
            }
            update_mpris(mpris, &snapshot, player.playlist().tracks());
            last_published = Some(published);
        }
        app.clamp(player.playlist().len());

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                &snapshot,
                player.playlist().tracks(),
                player.seek_bar(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            let Some(cmd) = command_for_control(cmd, player.state()) else {
                continue;
            };
            if apply(cmd, player, app, &settings.library) {
                return Ok(());
            }
        }

        if event::poll(poll_timeout(player.scheduler()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(cmd) = command_for_key(key, app, &settings.controls) else {
                    continue;
                };
                if apply(cmd, player, app, &settings.library) {
                    return Ok(());
                }
            }
        }
    }
}
