use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/stitchee/config.toml` or `~/.config/stitchee/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `STITCHEE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub concat: ConcatSettings,
    pub preview: PreviewSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// `chrono` format string used for the date column.
    pub date_format: String,

    /// Sort applied to the list given on the command line, if any.
    pub initial_sort: Option<SortKeySetting>,

    /// Whether `initial_sort` starts descending.
    pub initial_descending: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ line them up, stitch them together ~ ".to_string(),
            date_format: "%Y-%m-%d %H:%M".to_string(),
            initial_sort: None,
            initial_descending: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKeySetting {
    #[serde(alias = "title", alias = "filename")]
    Name,
    #[serde(alias = "modified", alias = "mtime")]
    Date,
    #[serde(alias = "bytes")]
    Size,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions offered by the add prompt and directory listing
    /// (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when listing a directory.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether sub-directories show up as folder rows when listing a directory.
    pub include_folders: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mov", "mp4", "m4v", "mkv", "avi", "webm", "mts", "m2ts", "ts"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            follow_links: true,
            include_hidden: false,
            include_folders: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConcatSettings {
    /// ffmpeg executable (name on `$PATH` or absolute path).
    pub ffmpeg_path: String,
    /// Extra arguments inserted before the concat input, e.g. `["-copytb", "1"]`.
    pub extra_input_args: Vec<String>,
    /// Keep the generated concat list next to the output after the run.
    pub keep_manifest: bool,
}

impl Default for ConcatSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            extra_input_args: Vec::new(),
            keep_manifest: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Previewer argv; selected paths are appended.
    pub command: Vec<String>,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        let command: &[&str] = if cfg!(target_os = "macos") {
            &["qlmanage", "-p"]
        } else {
            &["xdg-open"]
        };
        Self {
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: LogLevelSetting,
    /// Log file; defaults to `$XDG_STATE_HOME/stitchee/stitchee.log`.
    pub path: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevelSetting::Info,
            path: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevelSetting {
    Error,
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelSetting> for log::LevelFilter {
    fn from(level: LogLevelSetting) -> Self {
        match level {
            LogLevelSetting::Error => log::LevelFilter::Error,
            LogLevelSetting::Warn => log::LevelFilter::Warn,
            LogLevelSetting::Info => log::LevelFilter::Info,
            LogLevelSetting::Debug => log::LevelFilter::Debug,
            LogLevelSetting::Trace => log::LevelFilter::Trace,
        }
    }
}
