use std::{env, path::PathBuf};

use super::schema::Settings;

impl Settings {
    /// Load settings from the optional config file, overridden by `RONDO__*`
    /// environment variables.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = resolve_config_path() {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("RONDO")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Reject settings the player cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.timing.end_check_ms == 0 {
            return Err("timing.end_check_ms must be >= 1".to_string());
        }
        if self.timing.refresh_ms == 0 {
            return Err("timing.refresh_ms must be >= 1".to_string());
        }
        if !(0.0..=100.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within 0..=100".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `RONDO_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("RONDO_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/rondo/config.toml`, or `~/.config/rondo/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(config_home.join("rondo").join("config.toml"))
}
