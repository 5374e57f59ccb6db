//! Utilities for creating `rodio` sinks from files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested volume.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use rodio::{Decoder, OutputStream, Sink};

/// Create a paused `Sink` playing `path` from the start.
pub(super) fn create_sink(handle: &OutputStream, path: &Path, volume: f32) -> anyhow::Result<Sink> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let source = Decoder::new(BufReader::new(file))
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let sink = Sink::connect_new(handle.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
