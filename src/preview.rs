//! Handing selected items to an external previewer.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

use crate::config::PreviewSettings;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("nothing selected to preview")]
    NothingSelected,
    #[error("no preview command configured")]
    NoCommand,
    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
}

/// Build the previewer invocation for `paths`.
pub fn preview_command(
    paths: &[PathBuf],
    settings: &PreviewSettings,
) -> Result<Command, PreviewError> {
    if paths.is_empty() {
        return Err(PreviewError::NothingSelected);
    }
    let (program, args) = settings
        .command
        .split_first()
        .ok_or(PreviewError::NoCommand)?;

    let mut cmd = Command::new(program);
    cmd.args(args).args(paths);
    Ok(cmd)
}

/// Run the previewer in the foreground and wait for it to close.
pub fn show(paths: &[PathBuf], settings: &PreviewSettings) -> Result<ExitStatus, PreviewError> {
    let mut cmd = preview_command(paths, settings)?;
    let program = cmd.get_program().to_string_lossy().into_owned();
    log::info!("previewing {} item(s) with {program}", paths.len());
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| PreviewError::Spawn { program, source })
}
