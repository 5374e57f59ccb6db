//! Audio output.
//!
//! The playback state machine talks to audio output through the `MediaBackend`
//! trait. `RodioBackend` implements it with a dedicated audio thread that owns the
//! output stream and reports finished tracks through the end-of-track callback.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioBackend;
pub use types::*;

#[cfg(test)]
pub(crate) mod mock;
