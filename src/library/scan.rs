use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use lofty::file::AudioFile;
use lofty::probe::Probe;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Icon, MediaItem};
use super::order::{SortKey, SortOrder, sort_items};

pub(super) fn is_media_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Playback duration of a media file, detected from its content rather than
/// its extension (`.mov`, `.m4v` and friends are all QuickTime/MP4 inside).
fn probe_duration(path: &Path) -> Option<Duration> {
    let probe = match Probe::open(path).and_then(|p| p.guess_file_type().map_err(Into::into)) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("no duration for {}: {e}", path.display());
            return None;
        }
    };
    match probe.read() {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            log::debug!("no duration for {}: {e}", path.display());
            None
        }
    }
}

/// Look up the metadata for a single path.
///
/// Returns `None` when the file-system attributes can't be read; callers skip
/// such paths. Playback duration is only probed for regular files and stays
/// `None` when the container isn't understood.
pub fn item_from_path(path: &Path) -> Option<MediaItem> {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            log::debug!("skipping {}: {e}", path.display());
            return None;
        }
    };

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let is_container = meta.is_dir();

    let duration = if is_container {
        None
    } else {
        probe_duration(path)
    };

    let icon = if is_container {
        Icon::Folder
    } else if duration.is_some() {
        Icon::Movie
    } else {
        Icon::Other
    };

    Some(MediaItem {
        path: path.to_path_buf(),
        name,
        modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        size: if is_container { 0 } else { meta.len() },
        is_container,
        duration,
        icon,
    })
}

/// List the immediate contents of `dir`.
///
/// Does not descend into sub-directories; those become folder rows when
/// `include_folders` is set. Files are kept only if their extension is one of
/// the configured media extensions. The result is ordered by name, folders
/// first.
pub fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Vec<MediaItem> {
    let mut items: Vec<MediaItem> = Vec::new();

    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .min_depth(1)
        .max_depth(1);

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        let wanted = if entry.file_type().is_dir() {
            settings.include_folders
        } else {
            is_media_file(path, settings)
        };
        if !wanted {
            continue;
        }
        if let Some(item) = item_from_path(path) {
            items.push(item);
        }
    }

    sort_items(&mut items, SortKey::Name, SortOrder::Ascending);
    log::debug!("listed {} items from {}", items.len(), dir.display());
    items
}

/// Resolve paths chosen in the add prompt or on the command line.
///
/// Directories are listed one level deep; files that are not media files are
/// skipped, as are paths whose metadata can't be read.
pub fn expand_paths(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<MediaItem> {
    let mut items = Vec::new();
    for path in paths {
        if path.is_dir() {
            items.extend(scan_dir(path, settings));
        } else if is_media_file(path, settings) {
            items.extend(item_from_path(path));
        } else {
            log::debug!("not a media file, skipping {}", path.display());
        }
    }
    items
}

/// Resolve paths dropped onto the window: every readable path becomes an
/// item, folders included, with no extension filter.
pub fn items_from_paths(paths: &[PathBuf]) -> Vec<MediaItem> {
    paths.iter().filter_map(|p| item_from_path(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_media_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_media_file(Path::new("/tmp/a.mov"), &settings));
        assert!(is_media_file(Path::new("/tmp/a.MOV"), &settings));
        assert!(is_media_file(Path::new("/tmp/a.mp4"), &settings));
        assert!(is_media_file(Path::new("/tmp/a.mkv"), &settings));
        assert!(!is_media_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_media_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn is_media_file_tolerates_dotted_extension_settings() {
        let settings = LibrarySettings {
            extensions: vec![".MTS".into(), "  ".into()],
            ..LibrarySettings::default()
        };
        assert!(is_media_file(Path::new("/tmp/clip.mts"), &settings));
        assert!(!is_media_file(Path::new("/tmp/clip.mov"), &settings));
    }

    #[test]
    fn item_from_path_reads_size_and_name() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("clip.mov");
        fs::write(&p, b"0123456789").unwrap();

        let item = item_from_path(&p).unwrap();
        assert_eq!(item.name, "clip.mov");
        assert_eq!(item.size, 10);
        assert!(!item.is_container);
        // Not a real movie, so no duration can be probed.
        assert_eq!(item.duration, None);
        assert_eq!(item.icon, Icon::Other);
    }

    fn atom(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(body);
        out
    }

    /// Smallest QuickTime file with a sound track of `millis` length.
    fn quicktime_clip(millis: u32) -> Vec<u8> {
        let mut mdhd = vec![0u8; 12]; // version, flags, creation, modification
        mdhd.extend_from_slice(&1000u32.to_be_bytes());
        mdhd.extend_from_slice(&millis.to_be_bytes());
        mdhd.extend_from_slice(&[0; 4]);

        let mut hdlr = vec![0u8; 8];
        hdlr.extend_from_slice(b"soun");
        hdlr.extend_from_slice(&[0; 13]);

        let mdia = atom(b"mdia", &[atom(b"mdhd", &mdhd), atom(b"hdlr", &hdlr)].concat());
        let moov = atom(b"moov", &atom(b"trak", &mdia));
        [atom(b"ftyp", b"qt  \0\0\0\0qt  "), moov].concat()
    }

    #[test]
    fn item_from_path_reads_quicktime_duration_whatever_the_extension() {
        let dir = tempdir().unwrap();
        for name in ["clip.mov", "clip.MTS", "clip.mp4"] {
            let p = dir.path().join(name);
            fs::write(&p, quicktime_clip(5_000)).unwrap();

            let item = item_from_path(&p).unwrap();
            assert_eq!(item.duration, Some(Duration::from_secs(5)), "{name}");
            assert_eq!(item.icon, Icon::Movie, "{name}");
        }
    }

    #[test]
    fn item_from_path_marks_directories_as_containers() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("Holiday");
        fs::create_dir(&sub).unwrap();

        let item = item_from_path(&sub).unwrap();
        assert!(item.is_container);
        assert_eq!(item.icon, Icon::Folder);
        assert_eq!(item.size, 0);
    }

    #[test]
    fn item_from_path_skips_missing_paths() {
        let dir = tempdir().unwrap();
        assert!(item_from_path(&dir.path().join("gone.mov")).is_none());
    }

    #[test]
    fn scan_dir_lists_one_level_folders_first_and_filters_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MOV"), b"x").unwrap();
        fs::write(dir.path().join("a.mp4"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let sub = dir.path().join("zz-folder");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("nested.mov"), b"x").unwrap();

        let items = scan_dir(dir.path(), &LibrarySettings::default());
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["zz-folder", "a.mp4", "b.MOV"]);
    }

    #[test]
    fn scan_dir_respects_include_hidden_and_include_folders() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mov"), b"x").unwrap();
        fs::write(dir.path().join("visible.mov"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let settings = LibrarySettings {
            include_folders: false,
            ..LibrarySettings::default()
        };
        let items = scan_dir(dir.path(), &settings);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "visible.mov");

        let settings = LibrarySettings {
            include_hidden: true,
            include_folders: false,
            ..LibrarySettings::default()
        };
        assert_eq!(scan_dir(dir.path(), &settings).len(), 2);
    }

    #[test]
    fn expand_paths_lists_dirs_and_skips_non_media_files() {
        let dir = tempdir().unwrap();
        let clips = dir.path().join("clips");
        fs::create_dir(&clips).unwrap();
        fs::write(clips.join("one.mov"), b"x").unwrap();
        let loose = dir.path().join("two.mp4");
        fs::write(&loose, b"x").unwrap();
        let readme = dir.path().join("README");
        fs::write(&readme, b"x").unwrap();

        let items = expand_paths(&[clips, loose, readme], &LibrarySettings::default());
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["one.mov", "two.mp4"]);
    }

    #[test]
    fn items_from_paths_keeps_anything_readable() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README");
        fs::write(&readme, b"x").unwrap();

        let items = items_from_paths(&[
            readme,
            dir.path().to_path_buf(),
            dir.path().join("missing.mov"),
        ]);
        assert_eq!(items.len(), 2);
        assert!(items[1].is_container);
    }
}
