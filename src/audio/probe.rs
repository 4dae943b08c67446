use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use tracing::warn;

use super::engine::DurationProbe;

/// Reads durations from file headers with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl DurationProbe for LoftyProbe {
    fn duration(&self, path: &Path) -> Option<Duration> {
        match lofty::read_from_path(path) {
            Ok(tagged) => {
                let d = tagged.properties().duration();
                (!d.is_zero()).then_some(d)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read duration");
                None
            }
        }
    }
}
