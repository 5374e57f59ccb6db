use std::io::{self, Write};

use clap::Parser;
use tracing::{info, warn};

use crate::app::PlaybackController;
use crate::audio::RodioBackend;
use crate::cli::Args;
use crate::library::expand_home;
use crate::ui;

mod command;
mod event_loop;
mod logging;
mod settings;
mod startup;

use command::Command;
use event_loop::Shell;

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let (settings, problem) = settings::load_settings(args.config.as_deref());
    logging::init(&settings.log);
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    if args.print_config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting simp");

    let options = startup::controller_options(&settings, args.mode);
    let controller = PlaybackController::new(RodioBackend::new(settings.audio.clone()), options);
    let shell = Shell::new(&controller, expand_home(&settings.library.default_dir));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", ui::banner(shell.default_dir()))?;

    if let Some(dir) = args.playlist {
        shell.execute(Command::Load(Some(dir)), &mut out)?;
    }

    shell.run(io::stdin().lock(), &mut out)?;
    Ok(())
}
