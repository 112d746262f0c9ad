//! Building and running the ffmpeg invocation that joins the list.
//!
//! The list is handed to ffmpeg's concat demuxer through a small manifest
//! file written next to the output. ffmpeg is started from an argument list,
//! never through a shell; the shell one-liner produced by
//! [`ConcatPlan::display_command`] exists only to be shown to the user.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

use crate::config::ConcatSettings;
use crate::library::MediaItem;

#[derive(Debug, Error)]
pub enum ConcatError {
    #[error("nothing to concatenate")]
    Empty,
    #[error("failed to write concat list {path}: {source}")]
    Manifest { path: PathBuf, source: io::Error },
    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
}

/// Everything needed to join a list of files, in order, into one output.
#[derive(Clone, Debug)]
pub struct ConcatPlan {
    ffmpeg: String,
    extra_input_args: Vec<String>,
    inputs: Vec<PathBuf>,
    output: PathBuf,
    manifest: PathBuf,
    keep_manifest: bool,
}

/// `dest` with the first input's extension appended, the way the save
/// prompt's answer is completed.
pub fn output_path(dest: &Path, first: &Path) -> PathBuf {
    match first.extension() {
        Some(ext) => {
            let mut name: OsString = dest.as_os_str().to_owned();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        }
        None => dest.to_path_buf(),
    }
}

impl ConcatPlan {
    pub fn new(
        items: &[MediaItem],
        dest: &Path,
        settings: &ConcatSettings,
    ) -> Result<Self, ConcatError> {
        let first = items.first().ok_or(ConcatError::Empty)?;
        let output = output_path(dest, &first.path);

        let mut manifest = output.clone().into_os_string();
        manifest.push(".concat.txt");

        Ok(Self {
            ffmpeg: settings.ffmpeg_path.clone(),
            extra_input_args: settings.extra_input_args.clone(),
            // The demuxer resolves relative entries against the manifest's
            // directory, not ours.
            inputs: items
                .iter()
                .map(|i| std::path::absolute(&i.path).unwrap_or_else(|_| i.path.clone()))
                .collect(),
            output,
            manifest: PathBuf::from(manifest),
            keep_manifest: settings.keep_manifest,
        })
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    /// Contents of the concat demuxer list: one `file '<path>'` per input.
    pub fn manifest(&self) -> String {
        let mut out = String::new();
        for p in &self.inputs {
            out.push_str("file '");
            out.push_str(&p.to_string_lossy().replace('\'', r"'\''"));
            out.push_str("'\n");
        }
        out
    }

    /// Arguments passed to ffmpeg, program excluded.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_input_args.iter().map(OsString::from).collect();
        args.extend(["-f", "concat", "-safe", "0", "-i"].map(OsString::from));
        args.push(self.manifest.clone().into_os_string());
        args.extend(["-c", "copy"].map(OsString::from));
        args.push(self.output.clone().into_os_string());
        args
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(self.args());
        cmd
    }

    /// Shell one-liner equivalent to the plan, for display only.
    ///
    /// Paths are wrapped in single quotes and nothing more: a path containing
    /// a quote produces a line that won't run as-is.
    pub fn display_command(&self) -> String {
        let paths = self
            .inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("' '");
        let mut extra = self.extra_input_args.join(" ");
        if !extra.is_empty() {
            extra.push(' ');
        }
        format!(
            "{} {}-f concat -i <(for f in '{}'; do echo \"file '$f'\"; done) -c copy '{}';",
            self.ffmpeg,
            extra,
            paths,
            self.output.display()
        )
    }

    /// AppleScript that opens Terminal and types [`Self::display_command`]
    /// into it. Unescaped, like the command it wraps.
    pub fn terminal_script(&self) -> String {
        let command = self.display_command().replace('"', "\\\"");
        format!(
            "tell application \"Terminal\"\n\tactivate\n\tdo script with command \"{command}\"\n\tend tell"
        )
    }

    /// Write the manifest, run ffmpeg in the foreground with the terminal's
    /// stdio, then remove the manifest.
    pub fn run(&self) -> Result<ExitStatus, ConcatError> {
        std::fs::write(&self.manifest, self.manifest()).map_err(|source| ConcatError::Manifest {
            path: self.manifest.clone(),
            source,
        })?;

        log::info!("running: {}", self.display_command());
        let status = self
            .command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        if !self.keep_manifest {
            if let Err(e) = std::fs::remove_file(&self.manifest) {
                log::warn!("could not remove {}: {e}", self.manifest.display());
            }
        }

        let status = status.map_err(|source| ConcatError::Spawn {
            program: self.ffmpeg.clone(),
            source,
        })?;
        if status.success() {
            log::info!("wrote {}", self.output.display());
        } else {
            log::error!("{} exited with {status}", self.ffmpeg);
        }
        Ok(status)
    }
}
