use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::audio::{BackendHandle, MediaBackend};
use crate::config::LibrarySettings;
use crate::error::{PlayerError, Result};
use crate::library::{Track, scan_playlist};

use super::model::{ControllerState, PlaybackMode, PlaybackState, Snapshot, Step};

/// Construction-time knobs for a `PlaybackController`.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    pub library: LibrarySettings,
    pub mode: PlaybackMode,
    /// Start playing as soon as a non-empty playlist is loaded.
    pub autoplay_on_load: bool,
}

struct Inner<B> {
    state: ControllerState,
    backend: B,
    /// Handle of the track the backend is rendering, if any.
    handle: Option<BackendHandle>,
}

impl<B: MediaBackend> Inner<B> {
    fn play_index(&mut self, index: usize) {
        let handle = self.backend.load(&self.state.playlist[index]);
        self.backend.play(handle);
        self.handle = Some(handle);
        self.state.index = Some(index);
        self.state.state = PlaybackState::Playing;
    }

    fn stop_playback(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.backend.stop(handle);
        }
        self.state.state = PlaybackState::Stopped;
    }

    fn backend_playing(&self) -> bool {
        self.handle
            .map(|h| self.backend.is_playing(h))
            .unwrap_or(false)
    }

    fn track_ended(&mut self, handle: BackendHandle) {
        if self.handle != Some(handle) {
            debug!(?handle, "ignoring end of a track that is no longer current");
            return;
        }
        match self.state.state {
            PlaybackState::Playing => self.advance_after_end(),
            // The sink ran dry while the pause was in flight. Stay Paused; the next
            // toggle applies the end-of-track rule.
            PlaybackState::Paused => {
                debug!(?handle, "track ended while paused");
                self.handle = None;
            }
            PlaybackState::Stopped => {}
        }
    }

    fn advance_after_end(&mut self) {
        match self.state.end_of_track_target() {
            Some(next) => {
                debug!(next, mode = %self.state.mode, "advancing after end of track");
                self.play_index(next);
            }
            None => {
                info!("reached the end of the playlist");
                self.handle = None;
                self.state.state = PlaybackState::Stopped;
            }
        }
    }
}

/// Playlist and playback state machine on top of a `MediaBackend`.
///
/// All state lives behind one mutex, shared with the backend's end-of-track
/// callback, so user commands and automatic advances never interleave. Every
/// operation either succeeds or leaves the state exactly as it was.
pub struct PlaybackController<B: MediaBackend + 'static> {
    inner: Arc<Mutex<Inner<B>>>,
    library: LibrarySettings,
    autoplay_on_load: bool,
}

impl<B: MediaBackend + 'static> PlaybackController<B> {
    pub fn new(backend: B, options: ControllerOptions) -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            state: ControllerState::new(options.mode),
            backend,
            handle: None,
        }));

        // The backend owns the callback, so it must not keep the state alive.
        let weak = Arc::downgrade(&inner);
        lock_inner(&inner)
            .backend
            .on_end_of_track(Box::new(move |handle| {
                if let Some(inner) = weak.upgrade() {
                    lock_inner(&inner).track_ended(handle);
                }
            }));

        Self {
            inner,
            library: options.library,
            autoplay_on_load: options.autoplay_on_load,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<B>> {
        lock_inner(&self.inner)
    }

    /// Replace the playlist with the supported files of `dir`.
    ///
    /// The new position is `start` when given, otherwise the first track (or none for
    /// an empty directory). An invalid directory or an out-of-range `start` leaves the
    /// previous playlist in place. Returns the number of tracks loaded.
    pub fn load_playlist(&self, dir: &Path, start: Option<usize>) -> Result<usize> {
        let tracks = scan_playlist(dir, &self.library)?;
        let count = tracks.len();
        if let Some(index) = start.filter(|&i| i >= count) {
            return Err(PlayerError::InvalidIndex { index, count });
        }

        let mut inner = self.lock();
        if inner.state.state != PlaybackState::Stopped || inner.backend_playing() {
            inner.stop_playback();
        }

        inner.state.playlist = tracks;
        inner.state.index = start.or((count > 0).then_some(0));
        info!(dir = %dir.display(), tracks = count, "loaded playlist");

        if self.autoplay_on_load {
            if let Some(index) = inner.state.index {
                inner.play_index(index);
            }
        }
        Ok(count)
    }

    /// Play the track at `index` from its beginning.
    pub fn play(&self, index: usize) -> Result<()> {
        let mut inner = self.lock();
        if inner.state.is_empty() {
            return Err(PlayerError::PlaylistNotLoaded);
        }
        let index = inner.state.check_index(index)?;
        inner.play_index(index);
        Ok(())
    }

    /// Pause when playing, resume when paused, and start the current track when
    /// stopped. A track that ran out while paused is followed up as if it had ended
    /// during playback. Returns the resulting state.
    pub fn toggle_pause(&self) -> Result<PlaybackState> {
        let mut inner = self.lock();
        if inner.state.is_empty() {
            return Err(PlayerError::PlaylistNotLoaded);
        }

        match (inner.state.state, inner.handle) {
            (PlaybackState::Playing, Some(handle)) => {
                inner.backend.pause(handle);
                inner.state.state = PlaybackState::Paused;
            }
            (PlaybackState::Paused, Some(handle)) => {
                inner.backend.resume(handle);
                inner.state.state = PlaybackState::Playing;
            }
            (PlaybackState::Paused, None) => inner.advance_after_end(),
            _ => {
                let index = inner.state.check_index(inner.state.index.unwrap_or(0))?;
                inner.play_index(index);
            }
        }
        Ok(inner.state.state)
    }

    /// Move to the next track. Returns the new index, or `None` when already at the
    /// last track in a mode that does not wrap (nothing changes then).
    pub fn next(&self) -> Result<Option<usize>> {
        self.step(Step::Forward)
    }

    /// Move to the previous track. Returns the new index, or `None` when already at
    /// the first track in a mode that does not wrap (nothing changes then).
    pub fn prev(&self) -> Result<Option<usize>> {
        self.step(Step::Back)
    }

    fn step(&self, step: Step) -> Result<Option<usize>> {
        let mut inner = self.lock();
        if inner.state.is_empty() {
            return Err(PlayerError::PlaylistNotLoaded);
        }

        let target = inner.state.step_target(step);
        match target {
            Some(index) => inner.play_index(index),
            None => debug!(?step, mode = %inner.state.mode, "at playlist boundary"),
        }
        Ok(target)
    }

    /// Stop playback. The current index is kept so playback can pick up from it.
    pub fn stop(&self) {
        self.lock().stop_playback();
    }

    /// Set the mode from one of the tokens `NORMAL`, `LOOP` or `REPEAT`.
    pub fn set_mode(&self, token: &str) -> Result<PlaybackMode> {
        let mode: PlaybackMode = token.parse()?;
        self.set_playback_mode(mode);
        Ok(mode)
    }

    pub fn set_playback_mode(&self, mode: PlaybackMode) {
        let mut inner = self.lock();
        if inner.state.mode != mode {
            debug!(from = %inner.state.mode, to = %mode, "playback mode changed");
        }
        inner.state.mode = mode;
    }

    pub fn current_track(&self) -> Option<Track> {
        self.lock().state.current_track().cloned()
    }

    pub fn current_index(&self) -> Option<usize> {
        let inner = self.lock();
        inner.state.index.filter(|&i| i < inner.state.len())
    }

    pub fn mode(&self) -> PlaybackMode {
        self.lock().state.mode
    }

    pub fn state(&self) -> PlaybackState {
        self.lock().state.state
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.lock().state.playlist.clone()
    }

    pub fn library(&self) -> &LibrarySettings {
        &self.library
    }

    pub fn snapshot(&self) -> Snapshot {
        let inner = self.lock();
        Snapshot {
            index: inner.state.index,
            track: inner.state.current_track().cloned(),
            mode: inner.state.mode,
            state: inner.state.state,
            len: inner.state.len(),
        }
    }
}

fn lock_inner<B>(inner: &Mutex<Inner<B>>) -> MutexGuard<'_, Inner<B>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}
