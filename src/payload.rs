//! Drag payloads: the row indices carried by an in-list drag, and the path
//! lists a terminal pastes when files are dropped onto it.

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Type tag written in front of every encoded row payload.
const ROWS_FLAVOR: &str = "stitchee.rows";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("no drag in progress")]
    NoDrag,
    #[error("payload is not a row drag")]
    WrongFlavor,
    #[error("malformed row payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serialize a set of row indices for the pasteboard.
pub fn encode_rows(rows: &BTreeSet<usize>) -> Result<Vec<u8>, PayloadError> {
    let mut data = format!("{ROWS_FLAVOR}\n").into_bytes();
    data.extend(serde_json::to_vec(rows)?);
    Ok(data)
}

/// Recover the row indices from a pasteboard payload.
pub fn decode_rows(data: &[u8]) -> Result<BTreeSet<usize>, PayloadError> {
    let body = data
        .strip_prefix(ROWS_FLAVOR.as_bytes())
        .and_then(|rest| rest.strip_prefix(b"\n"))
        .ok_or(PayloadError::WrongFlavor)?;
    Ok(serde_json::from_slice(body)?)
}

/// What the in-app drag pasteboard holds while a row drag is in progress.
#[derive(Clone, Debug, Default)]
pub struct Pasteboard {
    data: Option<Vec<u8>>,
}

impl Pasteboard {
    pub fn write(&mut self, data: Vec<u8>) {
        self.data = Some(data);
    }

    pub fn take(&mut self) -> Option<Vec<u8>> {
        self.data.take()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }
}

/// Split pasted text into paths.
///
/// Terminals paste dropped files as shell words (quoted or with escaped
/// spaces) or as `file://` URLs, one per line. Text that isn't valid shell
/// syntax is split on lines instead.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let words = match shell_words::split(text) {
        Ok(words) => words,
        Err(_) => text.lines().map(|l| l.trim().to_string()).collect(),
    };

    words
        .into_iter()
        .filter(|w| !w.is_empty())
        .map(|w| {
            if w.starts_with("file://") {
                if let Some(path) = Url::parse(&w).ok().and_then(|u| u.to_file_path().ok()) {
                    return path;
                }
            }
            PathBuf::from(w)
        })
        .collect()
}
