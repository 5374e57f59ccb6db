//! Playlist directories: the `Track` model and the flat-directory scanner.

mod model;
mod scan;

pub use model::Track;
pub use scan::{expand_home, scan_playlist};
