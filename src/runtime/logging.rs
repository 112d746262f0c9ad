use std::path::PathBuf;

use crate::config::{self, LoggingSettings};

/// Send `log` records to a file; the terminal belongs to the UI.
pub fn init_logger(settings: &LoggingSettings) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    if !settings.enabled {
        log::set_max_level(log::LevelFilter::Off);
        return Ok(None);
    }
    let Some(path) = settings.path.clone().or_else(config::default_log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(settings.level.into())
        .chain(fern::log_file(&path)?)
        .apply()?;

    Ok(Some(path))
}
