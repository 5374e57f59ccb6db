//! Application module: the playlist/playback state machine.
//!
//! `app::model` holds the plain state and its transition rules; `app::controller`
//! wraps them behind a mutex together with the `MediaBackend` that renders audio.

mod controller;
mod model;

pub use controller::{ControllerOptions, PlaybackController};
pub use model::*;
