//! Text rendering for the command prompt.
//!
//! Every line the REPL prints comes from here so the wording stays in one place.

use std::path::Path;

use crate::app::{PlaybackMode, PlaybackState, Snapshot};
use crate::library::Track;

const COMMANDS: &[(&str, &str)] = &[
    ("load [dir]", "load a flat playlist directory"),
    ("play [index]", "play the track at index (default: current)"),
    ("pause", "toggle pause"),
    ("stop", "stop playback"),
    ("mode [MODE]", "set playback mode: NORMAL, LOOP or REPEAT"),
    ("next", "play the next track"),
    ("prev", "play the previous track"),
    ("now", "show the current track"),
    ("list", "list the playlist"),
    ("status", "show mode, state and position"),
    ("help", "show this message"),
    ("exit", "stop playback and quit"),
];

pub fn banner(default_dir: &Path) -> String {
    format!(
        "Welcome to simp - the simple music player\n\
         Default music directory: {}\n\
         Type 'help' to see available commands.",
        default_dir.display()
    )
}

/// The command table, followed by the file types `load` picks up.
pub fn help_text(extensions: &[String]) -> String {
    let width = COMMANDS.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
    let mut text = String::from("Available commands:\n");
    for (cmd, what) in COMMANDS {
        text.push_str(&format!("  {cmd:<width$}  {what}\n"));
    }
    let supported = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .collect::<Vec<_>>()
        .join(", ");
    text.push_str(&format!("Supported files: {supported}\n"));
    text
}

pub fn now_playing(index: Option<usize>, track: Option<&Track>, state: PlaybackState) -> String {
    match (index, track) {
        (Some(i), Some(t)) => match state {
            PlaybackState::Stopped => format!("Current [{i}]: {} (stopped)", t.display_name()),
            PlaybackState::Paused => format!("Paused [{i}]: {}", t.display_name()),
            PlaybackState::Playing => format!("Now playing [{i}]: {}", t.display_name()),
        },
        _ => "No song currently playing".to_string(),
    }
}

pub fn track_list(tracks: &[Track], current: Option<usize>) -> String {
    if tracks.is_empty() {
        return "Playlist is empty".to_string();
    }
    let width = (tracks.len() - 1).to_string().len();
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if current == Some(i) { '>' } else { ' ' };
            format!("{marker} {i:>width$}  {}", t.display_name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn status_line(snapshot: &Snapshot) -> String {
    let position = match snapshot.index {
        Some(i) => format!("{i}/{}", snapshot.len),
        None => format!("-/{}", snapshot.len),
    };
    format!(
        "mode: {} | state: {} | track: {position}",
        snapshot.mode, snapshot.state
    )
}

pub fn mode_choices(current: PlaybackMode) -> String {
    let all = PlaybackMode::ALL
        .iter()
        .map(|m| m.token())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Available modes: {all} (current: {current})")
}

pub fn loaded(count: usize, dir: &Path) -> String {
    match count {
        0 => format!(
            "Loaded {}: no supported audio files found",
            dir.display()
        ),
        1 => format!("Loaded 1 track from {}", dir.display()),
        n => format!("Loaded {n} tracks from {}", dir.display()),
    }
}
