//! Application model types: `PlaybackMode`, `PlaybackState` and `ControllerState`.

use std::fmt;
use std::str::FromStr;

use crate::error::PlayerError;
use crate::library::Track;

/// How the playlist behaves at its ends and when a track finishes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Play through once and stop after the last track.
    #[default]
    Normal,
    /// Wrap around at both ends.
    LoopAll,
    /// Replay the current track when it ends. Explicit next/prev still move.
    RepeatOne,
}

impl PlaybackMode {
    pub const ALL: [PlaybackMode; 3] = [Self::Normal, Self::LoopAll, Self::RepeatOne];

    /// The token accepted by `FromStr` and printed by the CLI.
    pub fn token(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::LoopAll => "LOOP",
            Self::RepeatOne => "REPEAT",
        }
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for PlaybackMode {
    type Err = PlayerError;

    /// Exact, case-sensitive match on `NORMAL`, `LOOP` or `REPEAT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.token() == s)
            .ok_or_else(|| PlayerError::InvalidMode(s.to_string()))
    }
}

/// The playback state of the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
}

/// Everything the controller tracks. Only `PlaybackController` mutates it.
#[derive(Clone, Debug, Default)]
pub struct ControllerState {
    pub playlist: Vec<Track>,
    /// Current position; `None` when the playlist is empty.
    pub index: Option<usize>,
    pub mode: PlaybackMode,
    pub state: PlaybackState,
}

impl ControllerState {
    pub fn new(mode: PlaybackMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// Check that `index` is inside `[0, len)`.
    pub fn check_index(&self, index: usize) -> Result<usize, PlayerError> {
        if index < self.len() {
            Ok(index)
        } else {
            Err(PlayerError::InvalidIndex {
                index,
                count: self.len(),
            })
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.index.and_then(|i| self.playlist.get(i))
    }

    /// Target of an explicit next/prev, or `None` when the move would leave the
    /// playlist and the mode does not wrap.
    pub fn step_target(&self, step: Step) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let Some(cur) = self.index.filter(|&i| i < len) else {
            return Some(0);
        };

        match (step, self.mode) {
            (Step::Forward, PlaybackMode::LoopAll) => Some((cur + 1) % len),
            (Step::Back, PlaybackMode::LoopAll) => Some((cur + len - 1) % len),
            (Step::Forward, _) => (cur + 1 < len).then_some(cur + 1),
            (Step::Back, _) => cur.checked_sub(1),
        }
    }

    /// What to play after the current track finished on its own; `None` means stop.
    pub fn end_of_track_target(&self) -> Option<usize> {
        let cur = self.index.filter(|&i| i < self.len())?;
        match self.mode {
            PlaybackMode::RepeatOne => Some(cur),
            PlaybackMode::Normal | PlaybackMode::LoopAll => self.step_target(Step::Forward),
        }
    }
}

/// A consistent copy of the controller's state, minus the playlist itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub index: Option<usize>,
    pub track: Option<Track>,
    pub mode: PlaybackMode,
    pub state: PlaybackState,
    pub len: usize,
}
