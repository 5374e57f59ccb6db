//! Backend capability trait and the small types shared with the audio thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::library::Track;

/// Opaque reference to a track loaded into a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendHandle(pub u64);

/// Called by the backend, possibly from its own thread, when a track finishes on its own.
pub type EndOfTrackCallback = Box<dyn Fn(BackendHandle) + Send + Sync + 'static>;

/// The capability a `PlaybackController` needs from an audio output.
///
/// Implementations do their decoding and output elsewhere; every method here must
/// return promptly and must not call back into the controller synchronously.
pub trait MediaBackend: Send {
    /// Prepare `track` for playback and return a handle for it.
    fn load(&mut self, track: &Track) -> BackendHandle;
    /// Start rendering `handle` from the beginning, replacing anything current.
    fn play(&mut self, handle: BackendHandle);
    fn pause(&mut self, handle: BackendHandle);
    fn resume(&mut self, handle: BackendHandle);
    fn stop(&mut self, handle: BackendHandle);
    /// Whether `handle` is current and audibly playing (not paused).
    fn is_playing(&self, handle: BackendHandle) -> bool;
    /// Register the callback fired when the current track ends naturally.
    fn on_end_of_track(&mut self, callback: EndOfTrackCallback);
}

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Start playing the file behind `handle` from the beginning.
    Play { handle: BackendHandle, path: PathBuf },
    /// Pause the current sink.
    Pause,
    /// Resume the current sink.
    Resume,
    /// Stop playback immediately.
    Stop,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Playback status shared between the backend front and its audio thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackInfo {
    /// Handle of the track the backend is rendering (playing or paused).
    pub current: Option<BackendHandle>,
    /// Whether playback is currently active.
    pub playing: bool,
}

impl PlaybackInfo {
    pub fn started(&mut self, handle: BackendHandle) {
        self.current = Some(handle);
        self.playing = true;
    }

    pub fn paused(&mut self, handle: BackendHandle) {
        if self.current == Some(handle) {
            self.playing = false;
        }
    }

    pub fn resumed(&mut self, handle: BackendHandle) {
        if self.current == Some(handle) {
            self.playing = true;
        }
    }

    pub fn stopped(&mut self) {
        self.current = None;
        self.playing = false;
    }

    /// Clear `handle` if it is current. Returns whether it was current and playing,
    /// i.e. whether its end should be reported.
    pub fn finished(&mut self, handle: BackendHandle) -> bool {
        if self.current != Some(handle) {
            return false;
        }
        let was_playing = self.playing;
        self.stopped();
        was_playing
    }

    pub fn is_playing(&self, handle: BackendHandle) -> bool {
        self.playing && self.current == Some(handle)
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
pub(crate) type CallbackSlot = Arc<Mutex<Option<Arc<dyn Fn(BackendHandle) + Send + Sync>>>>;
