use crate::app::{ControllerOptions, PlaybackMode};
use crate::config;

/// Build controller options from settings; a mode given on the command line wins.
pub fn controller_options(
    settings: &config::Settings,
    mode_override: Option<PlaybackMode>,
) -> ControllerOptions {
    let configured = match settings.playback.mode {
        config::ModeSetting::Normal => PlaybackMode::Normal,
        config::ModeSetting::LoopAll => PlaybackMode::LoopAll,
        config::ModeSetting::RepeatOne => PlaybackMode::RepeatOne,
    };

    ControllerOptions {
        library: settings.library.clone(),
        mode: mode_override.unwrap_or(configured),
        autoplay_on_load: settings.playback.autoplay_on_load,
    }
}
