use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info, trace, warn};

use crate::audio::{AudioEngine, DurationProbe};
use crate::error::{EngineError, PlayerError};
use crate::library::Track;
use crate::playlist::{Direction, Playlist};
use crate::scheduler::{Scheduler, Timer};

use super::model::{
    Action, PAUSE_LABEL, PLAY_LABEL, PlaybackState, Progress, SeekBar, SeekOutcome, Snapshot,
};

/// Cadence of the two self-rescheduling checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timing {
    /// How often to ask the engine whether the track is still sounding.
    pub end_check: Duration,
    /// How often to push the engine position to the seek bar.
    pub refresh: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            end_check: Duration::from_millis(200),
            refresh: Duration::from_millis(1000),
        }
    }
}

/// Single-threaded owner of the playlist and the playback state.
///
/// Every state transition happens inside one of the methods below. The
/// engine is only ever polled, through `Timer`s this controller schedules
/// for itself and that the driver hands back via `on_timer`.
pub struct PlaybackController<E, P, S, B> {
    engine: E,
    probe: P,
    scheduler: S,
    seek_bar: B,
    timing: Timing,

    playlist: Playlist,
    state: PlaybackState,
    loaded: Option<PathBuf>,
    known_duration: Option<Duration>,
    /// Bumped on every entry into `Playing`; timers from older episodes are inert.
    episode: u64,
    volume: f64,
    status: String,

    /// Set while the controller itself writes to the seek bar.
    internal_update: bool,
}

impl<E, P, S, B> PlaybackController<E, P, S, B>
where
    E: AudioEngine,
    P: DurationProbe,
    S: Scheduler,
    B: SeekBar,
{
    pub fn new(engine: E, probe: P, scheduler: S, seek_bar: B, timing: Timing) -> Self {
        let mut controller = Self {
            engine,
            probe,
            scheduler,
            seek_bar,
            timing,
            playlist: Playlist::new(Vec::new()),
            state: PlaybackState::Stopped,
            loaded: None,
            known_duration: None,
            episode: 0,
            volume: 100.0,
            status: "Load a folder to start".to_string(),
            internal_update: false,
        };
        controller.disable_seek_bar();
        controller
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[cfg(test)]
    pub fn loaded_track(&self) -> Option<&PathBuf> {
        self.loaded.as_ref()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[cfg(test)]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn seek_bar(&self) -> &B {
        &self.seek_bar
    }

    /// Discard all playback state and rebuild the playlist from `tracks`.
    ///
    /// The first track is loaded (not played) when there is one.
    pub fn load_folder(&mut self, tracks: Vec<Track>) -> Result<(), PlayerError> {
        if let Err(e) = self.engine.stop() {
            warn!(error = %e, "engine failed to stop before folder load");
        }
        self.playlist.load(tracks);
        self.state = PlaybackState::Stopped;
        self.loaded = None;
        self.known_duration = None;

        if self.playlist.is_empty() {
            info!("folder has no playable tracks");
            self.disable_seek_bar();
            self.status = "No audio files found in selected folder.".to_string();
            return Ok(());
        }

        info!(tracks = self.playlist.len(), "folder loaded");
        self.load_current_track()
    }

    /// Load the playlist's current track into the engine without starting it.
    pub fn load_current_track(&mut self) -> Result<(), PlayerError> {
        let path = self.playlist.current()?.path.clone();
        if let Err(e) = self.engine.load(&path) {
            return Err(self.fail_load(path, e));
        }

        let duration = self.current_duration();
        debug!(path = %path.display(), ?duration, "track loaded");
        self.loaded = Some(path);
        self.known_duration = duration;
        self.show_progress(0.0);
        self.seek_bar.set_enabled(self.seekable());
        self.status = "Track loaded. Press Play.".to_string();
        Ok(())
    }

    /// Resume when paused, start the current track when stopped.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlaybackState::Playing => Ok(()),
            PlaybackState::Paused => {
                if let Err(e) = self.engine.unpause() {
                    return Err(self.fail_playback("Error playing track", e));
                }
                self.enter_playing();
                self.status = format!("Playing: {}", self.loaded_name());
                Ok(())
            }
            PlaybackState::Stopped => {
                if self.playlist.is_empty() {
                    self.status = "No tracks loaded. Please load a folder".to_string();
                    return Err(PlayerError::EmptyPlaylist);
                }
                self.load_current_track()?;
                if let Err(e) = self.engine.play(Duration::ZERO) {
                    return Err(self.fail_playback("Error playing track", e));
                }
                self.enter_playing();
                self.status = format!("Playing: {}", self.loaded_name());
                info!(track = %self.loaded_name(), "playback started");
                Ok(())
            }
        }
    }

    /// Pause playback. Does nothing unless currently playing.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Playing {
            return Ok(());
        }
        if let Err(e) = self.engine.pause() {
            return Err(self.fail_playback("Error pausing playback", e));
        }
        self.state = PlaybackState::Paused;
        self.status = "Playback paused".to_string();
        debug!("paused");
        Ok(())
    }

    /// Stop playback, keeping the loaded track so `play` can restart it.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        if let Err(e) = self.engine.stop() {
            return Err(self.fail_playback("Error stopping playback", e));
        }
        self.state = PlaybackState::Stopped;
        self.show_progress(0.0);
        self.status = "Playback Stopped".to_string();
        debug!("stopped");
        Ok(())
    }

    /// Seek handler for the seek bar channel.
    ///
    /// Values that arrive while the controller is writing to the bar are its
    /// own updates echoed back and are dropped.
    pub fn request_seek(&mut self, percent: f64) -> Result<SeekOutcome, PlayerError> {
        if self.internal_update {
            trace!(percent, "ignoring seek bar echo");
            return Ok(SeekOutcome::Suppressed);
        }
        self.seek(percent).map(|()| SeekOutcome::Applied)
    }

    /// Restart the loaded track at `percent` of its length.
    ///
    /// Ends in `Paused` when it started there, otherwise in `Playing`.
    pub fn seek(&mut self, percent: f64) -> Result<(), PlayerError> {
        let target = match (&self.loaded, self.known_duration) {
            (Some(path), Some(d)) if !d.is_zero() && percent.is_finite() => {
                (path.clone(), d.mul_f64(percent.clamp(0.0, 100.0) / 100.0))
            }
            _ => {
                debug!(percent, "seek unavailable");
                return Err(PlayerError::SeekUnavailable);
            }
        };
        let (path, offset) = target;
        let percent = percent.clamp(0.0, 100.0);
        let was = self.state;
        info!(?offset, percent, "seeking");

        if let Err(e) = self.engine.stop() {
            return Err(self.fail_playback("Error seeking track", e));
        }
        if let Err(e) = self.engine.load(&path) {
            return Err(self.fail_load(path, e));
        }
        if let Err(e) = self.engine.play(offset) {
            return Err(self.fail_playback("Error seeking track", e));
        }
        self.enter_playing();
        self.show_progress(percent);

        if was == PlaybackState::Paused {
            if let Err(e) = self.engine.pause() {
                return Err(self.fail_playback("Error seeking track", e));
            }
            self.state = PlaybackState::Paused;
            self.status = "Playback paused".to_string();
        } else {
            self.status = format!("Playing: {}", self.loaded_name());
        }
        Ok(())
    }

    /// Set the output volume in percent. Out-of-range values are clamped.
    pub fn set_volume(&mut self, percent: f64) -> Result<(), PlayerError> {
        if percent.is_nan() {
            return Err(PlayerError::InvalidVolume(percent.to_string()));
        }
        let percent = percent.clamp(0.0, 100.0);
        if let Err(e) = self.engine.set_volume((percent / 100.0) as f32) {
            return Err(self.fail_playback("Error setting volume", e));
        }
        self.volume = percent;
        debug!(volume = percent, "volume set");
        Ok(())
    }

    /// Make `index` current without playing it. Stops anything audible.
    pub fn select_track(&mut self, index: usize) -> Result<(), PlayerError> {
        self.playlist.select_index(index)?;
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
            self.stop()?;
        }
        self.load_current_track()?;
        self.status = "Track selected. Press Play.".to_string();
        Ok(())
    }

    /// Make `index` current and play it.
    pub fn activate_track(&mut self, index: usize) -> Result<(), PlayerError> {
        self.playlist.select_index(index)?;
        self.restart_current()
    }

    /// Step through the playlist (wrapping) and play the new current track.
    pub fn advance_track(&mut self, direction: Direction) -> Result<(), PlayerError> {
        if self.playlist.is_empty() {
            return Ok(());
        }
        self.playlist.advance(direction);
        self.restart_current()
    }

    /// Map a transport button onto the state machine.
    pub fn button_pressed(&mut self, action: Action) -> Result<(), PlayerError> {
        match action {
            Action::PlayPause if self.state == PlaybackState::Playing => self.pause(),
            Action::PlayPause => self.play(),
            Action::Stop => self.stop(),
            Action::Next => self.advance_track(Direction::Next),
            Action::Previous => self.advance_track(Direction::Previous),
        }
    }

    /// Handle a timer this controller scheduled earlier.
    pub fn on_timer(&mut self, timer: Timer) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Playing || timer.episode() != self.episode {
            trace!(?timer, state = %self.state, "timer inert");
            return Ok(());
        }
        match timer {
            Timer::EndCheck { episode } => self.check_end(episode),
            Timer::RefreshPosition { episode } => {
                if let Some(percent) = self.progress().percent() {
                    self.show_progress(percent);
                }
                self.scheduler
                    .schedule_after(self.timing.refresh, Timer::RefreshPosition { episode });
                Ok(())
            }
        }
    }

    /// Current position clamped to the known duration; `Unknown` with nothing loaded.
    pub fn progress(&self) -> Progress {
        if self.loaded.is_none() {
            return Progress::Unknown;
        }
        let position = match self.state {
            PlaybackState::Stopped => Duration::ZERO,
            _ => match self.engine.position_millis() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms as u64),
                Ok(_) => Duration::ZERO,
                Err(e) => {
                    debug!(error = %e, "position query failed");
                    Duration::ZERO
                }
            },
        };
        let position = match self.known_duration {
            Some(d) => position.min(d),
            None => position,
        };
        Progress::Known {
            position,
            duration: self.known_duration,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let current = self.playlist.current().ok();
        Snapshot {
            state: self.state,
            current_index: current.map(|_| self.playlist.current_index()),
            track_label: self
                .loaded_track_info()
                .map(|t| t.display.clone())
                .unwrap_or_else(|| "No track loaded".to_string()),
            progress: self.progress(),
            slider_enabled: self.seekable(),
            button_label: if self.state == PlaybackState::Playing {
                PAUSE_LABEL
            } else {
                PLAY_LABEL
            },
            status: self.status.clone(),
            volume: self.volume,
        }
    }

    fn check_end(&mut self, episode: u64) -> Result<(), PlayerError> {
        match self.engine.is_busy() {
            Ok(true) => {
                self.scheduler
                    .schedule_after(self.timing.end_check, Timer::EndCheck { episode });
                Ok(())
            }
            Ok(false) => {
                info!(track = %self.loaded_name(), "track finished, playing next");
                self.advance_track(Direction::Next)
            }
            Err(e) => Err(self.fail_playback("Error playing track", e)),
        }
    }

    fn restart_current(&mut self) -> Result<(), PlayerError> {
        if let Err(e) = self.stop() {
            warn!(error = %e, "stop before restart failed");
        }
        self.play()
    }

    fn enter_playing(&mut self) {
        self.state = PlaybackState::Playing;
        self.episode += 1;
        let episode = self.episode;
        self.scheduler
            .schedule_after(self.timing.end_check, Timer::EndCheck { episode });
        self.scheduler
            .schedule_after(self.timing.refresh, Timer::RefreshPosition { episode });
        debug!(episode, "playing");
    }

    fn seekable(&self) -> bool {
        self.loaded.is_some() && self.known_duration.is_some_and(|d| !d.is_zero())
    }

    /// Duration of the current track, probing it on first use.
    fn current_duration(&mut self) -> Option<Duration> {
        let track = self.playlist.current_mut().ok()?;
        if track.duration.is_none() {
            track.duration = self.probe.duration(&track.path);
        }
        track.duration
    }

    /// The playlist entry behind the engine's loaded file, if one is loaded.
    fn loaded_track_info(&self) -> Option<&Track> {
        self.loaded.as_ref()?;
        self.playlist.current().ok()
    }

    fn loaded_name(&self) -> String {
        self.loaded_track_info()
            .map(Track::file_name)
            .unwrap_or_default()
    }

    /// Write `percent` to the seek bar with the reentrancy guard raised.
    fn show_progress(&mut self, percent: f64) {
        self.internal_update = true;
        if let Some(echo) = self.seek_bar.set_value(percent) {
            if let Err(e) = self.request_seek(echo) {
                debug!(error = %e, "seek bar echo rejected");
            }
        }
        self.internal_update = false;
    }

    fn disable_seek_bar(&mut self) {
        self.show_progress(0.0);
        self.seek_bar.set_enabled(false);
    }

    /// Force `Stopped` after an engine failure and translate the error.
    fn fail_playback(&mut self, status: &str, err: EngineError) -> PlayerError {
        error!(error = %err, "{status}");
        self.state = PlaybackState::Stopped;
        self.loaded = None;
        self.known_duration = None;
        self.disable_seek_bar();
        self.status = status.to_string();
        PlayerError::Playback(err.to_string())
    }

    fn fail_load(&mut self, path: PathBuf, err: EngineError) -> PlayerError {
        // Only the current track is ever loaded, so it names the failure.
        let name = self
            .playlist
            .current()
            .map(Track::file_name)
            .unwrap_or_default();
        error!(error = %err, "Error loading: {name}");
        self.state = PlaybackState::Stopped;
        self.loaded = None;
        self.known_duration = None;
        self.disable_seek_bar();
        self.status = format!("Error loading: {name}");
        PlayerError::track_load(path, err)
    }
}
