use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/simp/config.toml` or `~/.config/simp/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SIMP__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume applied to every track (1.0 = unchanged).
    pub volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Mode the player starts in.
    pub mode: ModeSetting,
    /// Start playing as soon as a non-empty playlist is loaded.
    pub autoplay_on_load: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            mode: ModeSetting::Normal,
            autoplay_on_load: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum ModeSetting {
    #[serde(rename = "NORMAL", alias = "normal", alias = "no-loop")]
    Normal,
    #[serde(
        rename = "LOOP",
        alias = "loop",
        alias = "loop-all",
        alias = "loop_all"
    )]
    LoopAll,
    #[serde(
        rename = "REPEAT",
        alias = "repeat",
        alias = "repeat-one",
        alias = "loop-one"
    )]
    RepeatOne,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether symlinks inside the playlist directory are followed.
    ///
    /// When on, a symlink to a directory counts as a subdirectory.
    pub follow_links: bool,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
    /// Directory used by `load` when no path is given. `~` is expanded.
    pub default_dir: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into()],
            follow_links: true,
            include_hidden: true,
            default_dir: "~/Music".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}
