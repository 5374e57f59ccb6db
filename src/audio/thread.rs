use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::{AudioCmd, BackendHandle, CallbackSlot, PlaybackHandle};

/// How often the thread checks whether the current sink ran dry.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    on_end: CallbackSlot,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "no audio output device; playback is silent");
                if let Ok(mut info) = playback_info.lock() {
                    info.stopped();
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a line-oriented prompt.
        stream.log_on_drop(false);

        let mut current: Option<(BackendHandle, Sink)> = None;
        let mut paused = false;

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64, volume: f32) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(volume * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play { handle, path } => {
                        if let Some((_, old)) = current.take() {
                            old.stop();
                        }
                        match create_sink(&stream, &path, audio_settings.volume) {
                            Ok(sink) => {
                                sink.play();
                                debug!(?handle, path = %path.display(), "playing");
                                current = Some((handle, sink));
                                paused = false;
                            }
                            Err(e) => {
                                warn!(error = %format!("{e:#}"), "cannot play track");
                                // Nothing will end, so no callback fires for this handle.
                                if let Ok(mut info) = playback_info.lock() {
                                    info.finished(handle);
                                }
                            }
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some((_, ref s)) = current {
                            s.pause();
                            paused = true;
                        }
                    }

                    AudioCmd::Resume => {
                        if let Some((_, ref s)) = current {
                            s.play();
                            paused = false;
                        }
                    }

                    AudioCmd::Stop => {
                        if let Some((_, old)) = current.take() {
                            old.stop();
                        }
                        paused = false;
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some((_, ref s)) = current {
                            if !paused {
                                // Fade out gently before stopping.
                                fade_out_sink(s, fade_out_ms, audio_settings.volume);
                            }
                            s.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.stopped();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic check for a track that ran to its end
                    let ended = match current {
                        Some((handle, ref s)) if !paused && s.empty() => Some(handle),
                        _ => None,
                    };
                    let Some(handle) = ended else {
                        continue;
                    };
                    current = None;

                    let report = playback_info
                        .lock()
                        .map(|mut info| info.finished(handle))
                        .unwrap_or(false);
                    if !report {
                        continue;
                    }

                    debug!(?handle, "end of track");
                    let callback = on_end.lock().ok().and_then(|slot| slot.clone());
                    if let Some(callback) = callback {
                        callback(handle);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
