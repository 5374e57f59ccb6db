//! Error types for playlist loading and playback control.

use std::path::PathBuf;

use thiserror::Error;

/// Everything a controller operation can fail with.
///
/// None of these are fatal: the CLI prints the message and keeps reading commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The directory is missing, is not a directory, contains subdirectories or
    /// could not be listed.
    #[error("invalid playlist {}: {reason}", path.display())]
    InvalidPlaylist { path: PathBuf, reason: String },

    /// The operation needs a non-empty playlist.
    #[error("no playlist is loaded, or the loaded playlist is empty")]
    PlaylistNotLoaded,

    /// A supplied or computed index is outside `[0, count)`.
    #[error("index {index} is out of range for a playlist of {count} track(s)")]
    InvalidIndex { index: usize, count: usize },

    /// A mode token that is not one of `NORMAL`, `LOOP` or `REPEAT`.
    #[error("invalid playback mode {0:?} (expected NORMAL, LOOP or REPEAT)")]
    InvalidMode(String),
}

impl PlayerError {
    pub(crate) fn invalid_playlist(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPlaylist {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for controller operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
