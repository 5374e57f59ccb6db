use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{PlayerError, Result};

use super::model::Track;

pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
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

/// Expand a leading `~` to `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, env::var_os("HOME").map(PathBuf::from))
}

pub(super) fn expand_home_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

/// List the supported audio files of a flat playlist directory.
///
/// The directory must exist, be a directory and hold no subdirectories. Files with
/// other extensions are skipped. Tracks are sorted by file name so that a given
/// directory always yields the same order.
pub fn scan_playlist(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>> {
    if !dir.exists() {
        return Err(PlayerError::invalid_playlist(dir, "directory does not exist"));
    }
    if !dir.is_dir() {
        return Err(PlayerError::invalid_playlist(dir, "not a directory"));
    }

    let root = dir
        .canonicalize()
        .map_err(|e| PlayerError::invalid_playlist(dir, e.to_string()))?;

    let walker = WalkDir::new(&root)
        .follow_links(settings.follow_links)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut tracks: Vec<Track> = Vec::new();
    let mut skipped = 0usize;

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken symlinks and unreadable entries are skipped like unsupported files.
            Err(e) if e.depth() > 0 => {
                warn!(error = %e, "skipping unreadable playlist entry");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(PlayerError::invalid_playlist(dir, e.to_string())),
        };
        let path = entry.path();

        if entry.file_type().is_dir() {
            return Err(PlayerError::invalid_playlist(
                dir,
                format!(
                    "contains subdirectory {:?}; a playlist must be a flat directory",
                    entry.file_name()
                ),
            ));
        }

        if !settings.include_hidden && is_hidden(path) {
            skipped += 1;
            continue;
        }

        if entry.file_type().is_file() && is_audio_file(path, settings) {
            tracks.push(Track::new(path));
        } else {
            skipped += 1;
        }
    }

    if tracks.is_empty() {
        info!(dir = %dir.display(), "playlist directory has no supported audio files");
    }
    debug!(
        dir = %dir.display(),
        tracks = tracks.len(),
        skipped,
        "scanned playlist directory"
    );
    Ok(tracks)
}
