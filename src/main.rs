mod app;
mod audio;
mod cli;
mod config;
mod error;
mod library;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
