use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{LoftyProbe, RodioEngine};
use crate::controller::{PlaybackController, Timing};
use crate::library::scan;
use crate::mpris::ControlCmd;
use crate::scheduler::TimerQueue;
use crate::ui::GaugeSeekBar;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;

#[cfg(test)]
mod tests;

/// The controller as the binary wires it.
pub type Player = PlaybackController<RodioEngine, LoftyProbe, TimerQueue, GaugeSeekBar>;

/// Terminal folder player.
#[derive(Parser, Debug)]
#[command(name = "rondo")]
#[command(about = "Play every audio file in a folder, in a loop")]
#[command(version)]
struct Args {
    /// Folder to play (defaults to the current directory)
    dir: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, env = "RONDO_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Initial volume in percent (0-100), overriding the config file
    #[arg(long, value_parser = parse_volume)]
    volume: Option<f64>,
}

fn parse_volume(s: &str) -> Result<f64, String> {
    let volume: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    if !(0.0..=100.0).contains(&volume) {
        return Err(format!("volume must be between 0 and 100, got {s}"));
    }
    Ok(volume)
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let (mut settings, settings_problem) = settings::load_settings();
    if let Some(path) = args.log_file {
        settings.logging.file = Some(path);
    }
    if let Some(volume) = args.volume {
        settings.audio.initial_volume = volume;
    }

    logging::init(&settings.logging)?;
    if let Some(problem) = settings_problem {
        warn!("{problem}");
    }

    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };
    info!(dir = %dir.display(), "starting rondo");

    let tracks = scan(&dir, &settings.library)
        .with_context(|| format!("Failed to read folder {}", dir.display()))?;

    let engine = RodioEngine::open_default().context("Failed to open audio output")?;
    let timing = Timing {
        end_check: std::time::Duration::from_millis(settings.timing.end_check_ms),
        refresh: std::time::Duration::from_millis(settings.timing.refresh_ms),
    };
    let mut player: Player = PlaybackController::new(
        engine,
        LoftyProbe,
        TimerQueue::new(),
        GaugeSeekBar::default(),
        timing,
    );
    player
        .set_volume(settings.audio.initial_volume)
        .context("Failed to set initial volume")?;
    if let Err(e) = player.load_folder(tracks) {
        warn!(error = %e, "first track failed to load");
    }

    let mut app = App::new(&dir);
    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &mpris,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    run_result
}
