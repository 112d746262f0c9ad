use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `STITCHEE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("STITCHEE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate, falling back to defaults when either fails. The
    /// config is optional; a bad one must not keep the app from starting.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(s) => match s.validate() {
                Ok(()) => s,
                Err(msg) => {
                    eprintln!("stitchee: invalid config, using defaults: {msg}");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("stitchee: failed to load config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.concat.ffmpeg_path.trim().is_empty() {
            return Err("concat.ffmpeg_path must not be empty".to_string());
        }
        if self.preview.command.first().is_none_or(|p| p.trim().is_empty()) {
            return Err("preview.command must name a program".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `STITCHEE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("STITCHEE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/stitchee/config.toml`
/// or `~/.config/stitchee/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("stitchee").join("config.toml"))
}

/// Default log file under `$XDG_STATE_HOME/stitchee/` or `~/.local/state/stitchee/`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("stitchee").join("stitchee.log"))
}

fn xdg_home(var: &str, fallback: &[&str]) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        return Some(PathBuf::from(xdg));
    }
    env::var_os("HOME").map(|home| fallback.iter().fold(PathBuf::from(home), |p, s| p.join(s)))
}
