use clap::Parser;
use std::path::PathBuf;

use crate::app::PlaybackMode;
use crate::error::PlayerError;

/// simp - a simple music player for flat directories of audio files
#[derive(Parser, Debug)]
#[command(name = "simp", version, about)]
pub struct Args {
    /// Playlist directory to load at startup
    pub playlist: Option<String>,

    /// Playback mode to start in: NORMAL, LOOP or REPEAT
    #[arg(long, short = 'm', value_parser = parse_mode)]
    pub mode: Option<PlaybackMode>,

    /// Config file to use instead of the default location
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

fn parse_mode(s: &str) -> Result<PlaybackMode, PlayerError> {
    s.trim().to_ascii_uppercase().parse()
}
