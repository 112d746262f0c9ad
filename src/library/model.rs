use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Glyph shown next to an item's name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Icon {
    Folder,
    Movie,
    Other,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Folder => "▸",
            Icon::Movie => "▶",
            Icon::Other => "·",
        }
    }
}

/// One row of the list: a file or folder plus the metadata shown for it.
///
/// Identity is the path alone; the other fields are a snapshot taken when the
/// item was added and may be stale.
#[derive(Clone, Debug)]
pub struct MediaItem {
    pub path: PathBuf,
    pub name: String,
    pub modified: SystemTime,
    pub size: u64,
    pub is_container: bool,
    pub duration: Option<Duration>,
    pub icon: Icon,
}

impl PartialEq for MediaItem {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for MediaItem {}
