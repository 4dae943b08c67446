use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::error::EngineError;

use super::engine::AudioEngine;

/// Open and decode `path`, surfacing both failure kinds as engine errors.
pub(super) fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// `rodio`-backed engine. Seeking is done by building a fresh sink that skips
/// into the file, so `play(start_at)` is the only positioning primitive.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    loaded: Option<PathBuf>,
    /// Where the current sink started inside the track.
    offset: Duration,
    gain: f32,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::NoOutputDevice(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which garbles the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            offset: Duration::ZERO,
            gain: 1.0,
        })
    }

    fn drop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.offset = Duration::ZERO;
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        // Decode once up front so a bad file is rejected here rather than on play.
        decode(path)?;
        self.drop_sink();
        self.loaded = Some(path.to_path_buf());
        debug!(path = %path.display(), "engine loaded");
        Ok(())
    }

    fn play(&mut self, start_at: Duration) -> Result<(), EngineError> {
        let path = self.loaded.clone().ok_or(EngineError::NothingLoaded)?;
        self.drop_sink();

        let source = decode(&path)?.skip_duration(start_at);
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.gain);
        sink.append(source);
        sink.play();

        self.sink = Some(sink);
        self.offset = start_at;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        Ok(())
    }

    fn unpause(&mut self) -> Result<(), EngineError> {
        match &self.sink {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => Err(EngineError::NothingLoaded),
        }
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.drop_sink();
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) -> Result<(), EngineError> {
        self.gain = gain.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.gain);
        }
        Ok(())
    }

    fn is_busy(&self) -> Result<bool, EngineError> {
        Ok(self
            .sink
            .as_ref()
            .is_some_and(|s| !s.empty() && !s.is_paused()))
    }

    fn position_millis(&self) -> Result<i64, EngineError> {
        Ok(match &self.sink {
            Some(sink) => (self.offset + sink.get_pos()).as_millis() as i64,
            None => -1,
        })
    }
}
