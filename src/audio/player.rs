use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::library::Track;

use super::thread::spawn_audio_thread;
use super::types::{
    AudioCmd, BackendHandle, CallbackSlot, EndOfTrackCallback, MediaBackend, PlaybackHandle,
    PlaybackInfo,
};

/// `MediaBackend` that renders through `rodio` on a dedicated audio thread.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    on_end: CallbackSlot,
    loaded: HashMap<BackendHandle, PathBuf>,
    next_handle: u64,
    quit_fade_out_ms: u64,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
        let on_end: CallbackSlot = Arc::new(Mutex::new(None));
        let quit_fade_out_ms = audio_settings.quit_fade_out_ms;

        let audio_handle =
            spawn_audio_thread(rx, playback_info.clone(), on_end.clone(), audio_settings);

        Self {
            tx,
            playback: playback_info,
            on_end,
            loaded: HashMap::new(),
            next_handle: 0,
            quit_fade_out_ms,
            join: Some(audio_handle),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone");
        }
    }

    fn update(&self, f: impl FnOnce(&mut PlaybackInfo)) {
        if let Ok(mut info) = self.playback.lock() {
            f(&mut info);
        }
    }

    fn is_current(&self, handle: BackendHandle) -> bool {
        self.playback
            .lock()
            .map(|info| info.current == Some(handle))
            .unwrap_or(false)
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, track: &Track) -> BackendHandle {
        self.next_handle += 1;
        let handle = BackendHandle(self.next_handle);
        self.loaded.insert(handle, track.path().to_path_buf());
        debug!(?handle, format = track.extension(), "loaded track");
        handle
    }

    fn play(&mut self, handle: BackendHandle) {
        // Only the track being played can be resumed or replayed later.
        self.loaded.retain(|h, _| *h == handle);
        let Some(path) = self.loaded.get(&handle).cloned() else {
            warn!(?handle, "play requested for a handle that was never loaded");
            return;
        };
        self.update(|info| info.started(handle));
        self.send(AudioCmd::Play { handle, path });
    }

    fn pause(&mut self, handle: BackendHandle) {
        if self.is_current(handle) {
            self.update(|info| info.paused(handle));
            self.send(AudioCmd::Pause);
        }
    }

    fn resume(&mut self, handle: BackendHandle) {
        if self.is_current(handle) {
            self.update(|info| info.resumed(handle));
            self.send(AudioCmd::Resume);
        }
    }

    fn stop(&mut self, handle: BackendHandle) {
        if self.is_current(handle) {
            self.update(PlaybackInfo::stopped);
            self.send(AudioCmd::Stop);
        }
    }

    fn is_playing(&self, handle: BackendHandle) -> bool {
        self.playback
            .lock()
            .map(|info| info.is_playing(handle))
            .unwrap_or(false)
    }

    fn on_end_of_track(&mut self, callback: EndOfTrackCallback) {
        if let Ok(mut slot) = self.on_end.lock() {
            *slot = Some(Arc::from(callback));
        }
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: self.quit_fade_out_ms,
        });

        if let Some(h) = self.join.take() {
            // The last controller reference can be released from inside the
            // end-of-track callback, which runs on the audio thread itself.
            if h.thread().id() != thread::current().id() {
                let _ = h.join();
            }
        }
        debug!("audio backend shut down");
    }
}
