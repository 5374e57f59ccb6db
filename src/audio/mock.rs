//! In-memory `MediaBackend` that records every call, for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::library::Track;

use super::types::{BackendHandle, EndOfTrackCallback, MediaBackend};

/// A backend call, named by the file name of the track it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Play(String),
    Pause(String),
    Resume(String),
    Stop(String),
}

#[derive(Default)]
struct Shared {
    calls: Vec<Call>,
    names: HashMap<BackendHandle, String>,
    current: Option<BackendHandle>,
    playing: bool,
    callback: Option<Arc<dyn Fn(BackendHandle) + Send + Sync>>,
}

pub struct RecordingBackend {
    shared: Arc<Mutex<Shared>>,
    next_handle: u64,
}

/// Test-side view of a `RecordingBackend` after it moved into a controller.
#[derive(Clone)]
pub struct BackendProbe {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingBackend {
    pub fn new() -> (Self, BackendProbe) {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let probe = BackendProbe {
            shared: shared.clone(),
        };
        (
            Self {
                shared,
                next_handle: 0,
            },
            probe,
        )
    }

    fn record(&self, handle: BackendHandle, make: fn(String) -> Call) {
        let mut shared = self.shared.lock().unwrap();
        let name = shared.names.get(&handle).cloned().unwrap_or_default();
        shared.calls.push(make(name));
    }
}

impl MediaBackend for RecordingBackend {
    fn load(&mut self, track: &Track) -> BackendHandle {
        self.next_handle += 1;
        let handle = BackendHandle(self.next_handle);
        self.shared
            .lock()
            .unwrap()
            .names
            .insert(handle, track.display_name());
        handle
    }

    fn play(&mut self, handle: BackendHandle) {
        self.record(handle, Call::Play);
        let mut shared = self.shared.lock().unwrap();
        shared.current = Some(handle);
        shared.playing = true;
    }

    fn pause(&mut self, handle: BackendHandle) {
        self.record(handle, Call::Pause);
        self.shared.lock().unwrap().playing = false;
    }

    fn resume(&mut self, handle: BackendHandle) {
        self.record(handle, Call::Resume);
        self.shared.lock().unwrap().playing = true;
    }

    fn stop(&mut self, handle: BackendHandle) {
        self.record(handle, Call::Stop);
        let mut shared = self.shared.lock().unwrap();
        shared.current = None;
        shared.playing = false;
    }

    fn is_playing(&self, handle: BackendHandle) -> bool {
        let shared = self.shared.lock().unwrap();
        shared.playing && shared.current == Some(handle)
    }

    fn on_end_of_track(&mut self, callback: EndOfTrackCallback) {
        self.shared.lock().unwrap().callback = Some(Arc::from(callback));
    }
}

impl BackendProbe {
    pub fn calls(&self) -> Vec<Call> {
        self.shared.lock().unwrap().calls.clone()
    }

    pub fn clear(&self) {
        self.shared.lock().unwrap().calls.clear();
    }

    pub fn current(&self) -> Option<BackendHandle> {
        self.shared.lock().unwrap().current
    }

    /// Simulate the current track running to its end.
    pub fn finish_current(&self) {
        let handle = self.current().expect("no track is playing");
        self.finish(handle);
    }

    /// Fire the end-of-track callback for `handle`, as the audio thread would.
    pub fn finish(&self, handle: BackendHandle) {
        let callback = {
            let mut shared = self.shared.lock().unwrap();
            if shared.current == Some(handle) {
                shared.current = None;
                shared.playing = false;
            }
            shared.callback.clone()
        };
        if let Some(callback) = callback {
            callback(handle);
        }
    }
}
