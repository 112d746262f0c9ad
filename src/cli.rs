use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::library::SortKey;

#[derive(Parser, Debug)]
#[command(name = "stitchee", version, about = "Line up movie files and join them with ffmpeg")]
pub struct Cli {
    /// Files or folders to start with. Folders are listed one level deep.
    pub paths: Vec<PathBuf>,

    /// Sort the starting list by this column.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    pub descending: bool,

    /// Print the ffmpeg command that would join PATHS into DEST and exit.
    #[arg(long, value_name = "DEST")]
    pub print_command: Option<PathBuf>,

    /// With --print-command, print the AppleScript that runs the command in
    /// Terminal.app instead.
    #[arg(long, requires = "print_command")]
    pub script: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Date,
    Size,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Name => SortKey::Name,
            SortArg::Date => SortKey::Date,
            SortArg::Size => SortKey::Size,
        }
    }
}
