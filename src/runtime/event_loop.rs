use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::app::{PlaybackController, PlaybackState};
use crate::audio::MediaBackend;
use crate::library::expand_home;
use crate::ui;

use super::command::{self, Command};

/// Whether the prompt keeps reading after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The interactive prompt: reads commands and maps each one onto the controller.
pub struct Shell<'a, B: MediaBackend + 'static> {
    controller: &'a PlaybackController<B>,
    default_dir: PathBuf,
}

impl<'a, B: MediaBackend + 'static> Shell<'a, B> {
    pub fn new(controller: &'a PlaybackController<B>, default_dir: PathBuf) -> Self {
        Self {
            controller,
            default_dir,
        }
    }

    /// Read commands from `input` until `exit` or end of input. Playback is always
    /// stopped before returning.
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, ">>> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                self.controller.stop();
                writeln!(out, "Goodbye.")?;
                return Ok(());
            };

            match command::parse(&line?) {
                Ok(None) => {}
                Ok(Some(cmd)) => {
                    if self.execute(cmd, out)? == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(msg) => writeln!(out, "{msg}")?,
            }
        }
    }

    /// Run one command, printing its result or error message.
    pub fn execute<W: Write>(&self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        debug!(?cmd, "command");
        let c = self.controller;

        let message = match cmd {
            Command::Load(dir) => {
                let dir = dir.map(|d| expand_home(&d)).unwrap_or_else(|| self.default_dir.clone());
                c.load_playlist(&dir, None).map(|n| ui::loaded(n, &dir))
            }
            Command::Play(index) => {
                let index = index.or_else(|| c.current_index()).unwrap_or(0);
                c.play(index).map(|()| self.now_playing())
            }
            Command::Pause => c.toggle_pause().map(|state| match state {
                PlaybackState::Paused => "Paused".to_string(),
                _ => self.now_playing(),
            }),
            Command::Stop => {
                c.stop();
                Ok("Stopped".to_string())
            }
            Command::Mode(None) => Ok(ui::mode_choices(c.mode())),
            Command::Mode(Some(token)) => c.set_mode(&token).map(|m| format!("Mode set to {m}")),
            Command::Next => c.next().map(|moved| match moved {
                Some(_) => self.now_playing(),
                None => "Already at the last track".to_string(),
            }),
            Command::Prev => c.prev().map(|moved| match moved {
                Some(_) => self.now_playing(),
                None => "Already at the first track".to_string(),
            }),
            Command::Now => Ok(self.now_playing()),
            Command::List => Ok(ui::track_list(&c.tracks(), c.current_index())),
            Command::Status => Ok(ui::status_line(&c.snapshot())),
            Command::Help => Ok(ui::help_text(&c.library().extensions)),
            Command::Exit => {
                debug!(
                    track = ?c.current_track().map(|t| t.display_name()),
                    state = %c.state(),
                    "stopping before exit"
                );
                c.stop();
                writeln!(out, "Goodbye.")?;
                return Ok(Flow::Exit);
            }
        };

        match message {
            Ok(text) => writeln!(out, "{}", text.trim_end())?,
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    fn now_playing(&self) -> String {
        let snap = self.controller.snapshot();
        ui::now_playing(snap.index, snap.track.as_ref(), snap.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ControllerOptions;
    use crate::audio::mock::{Call, RecordingBackend};
    use std::fs;
    use tempfile::tempdir;

    fn run_script(
        controller: &PlaybackController<RecordingBackend>,
        default_dir: &Path,
        script: &str,
    ) -> String {
        let shell = Shell::new(controller, default_dir.to_path_buf());
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_session_drives_the_controller() {
        let dir = tempdir().unwrap();
        for f in ["a.mp3", "b.wav", "c.txt"] {
            fs::write(dir.path().join(f), b"x").unwrap();
        }
        let (backend, probe) = RecordingBackend::new();
        let c = PlaybackController::new(backend, ControllerOptions::default());

        let script = format!(
            "load {}\nplay 0\npause\nnext\nnext\nmode loop\nnext\nnow\nexit\nnow\n",
            dir.path().display()
        );
        let out = run_script(&c, dir.path(), &script);

        assert!(out.contains("Loaded 2 tracks"), "{out}");
        assert!(out.contains("Now playing [0]: a.mp3"), "{out}");
        assert!(out.contains("Paused"), "{out}");
        assert!(out.contains("Now playing [1]: b.wav"), "{out}");
        assert!(out.contains("Already at the last track"), "{out}");
        assert!(out.contains("Mode set to LOOP"), "{out}");
        assert!(out.trim_end().ends_with("Goodbye."), "{out}");
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.current_index(), Some(0));
        assert_eq!(probe.calls().last(), Some(&Call::Stop("a.mp3".into())));
    }

    #[test]
    fn errors_are_printed_and_the_prompt_continues() {
        let dir = tempdir().unwrap();
        let (backend, _) = RecordingBackend::new();
        let c = PlaybackController::new(backend, ControllerOptions::default());

        let out = run_script(&c, dir.path(), "play\nmode shuffle\nbogus\nplay x\nstatus\n");
        assert!(out.contains("Error: no playlist is loaded"), "{out}");
        assert!(out.contains("Error: invalid playback mode \"SHUFFLE\""), "{out}");
        assert!(out.contains("Unknown command"), "{out}");
        assert!(out.contains("Invalid index"), "{out}");
        assert!(out.contains("mode: NORMAL | state: stopped | track: -/0"), "{out}");
    }

    #[test]
    fn load_without_argument_uses_default_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("only.mp3"), b"x").unwrap();
        let (backend, _) = RecordingBackend::new();
        let c = PlaybackController::new(backend, ControllerOptions::default());

        let out = run_script(&c, dir.path(), "load\nlist\n");
        assert!(out.contains("Loaded 1 track from"), "{out}");
        assert!(out.contains(">  0  only.mp3") || out.contains("> 0  only.mp3"), "{out}");
    }

    #[test]
    fn end_of_input_stops_playback() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"x").unwrap();
        let (backend, probe) = RecordingBackend::new();
        let c = PlaybackController::new(backend, ControllerOptions::default());

        let out = run_script(&c, dir.path(), "load\nplay\n");
        assert!(out.contains("Goodbye."), "{out}");
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(probe.calls(), vec![Call::Play("a.mp3".into()), Call::Stop("a.mp3".into())]);
    }

    #[test]
    fn help_reflects_the_configured_extensions() {
        let dir = tempdir().unwrap();
        let (backend, _) = RecordingBackend::new();
        let mut options = ControllerOptions::default();
        options.library.extensions = vec!["flac".to_string()];
        let c = PlaybackController::new(backend, options);

        let out = run_script(&c, dir.path(), "help\n");
        assert!(out.contains("Supported files: .flac"), "{out}");
        assert!(!out.contains(".mp3"), "{out}");
    }

    #[test]
    fn now_reports_the_track_after_an_automatic_advance() {
        let dir = tempdir().unwrap();
        for f in ["a.mp3", "b.mp3"] {
            fs::write(dir.path().join(f), b"x").unwrap();
        }
        let (backend, probe) = RecordingBackend::new();
        let c = PlaybackController::new(backend, ControllerOptions::default());
        c.load_playlist(dir.path(), None).unwrap();
        c.play(0).unwrap();
        probe.finish_current();

        let shell = Shell::new(&c, dir.path().to_path_buf());
        let mut out = Vec::new();
        shell.execute(Command::Now, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Now playing [1]: b.mp3\n");
    }

    #[test]
    fn invalid_playlist_message_names_the_problem() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let (backend, _) = RecordingBackend::new();
        let c = PlaybackController::new(backend, ControllerOptions::default());

        let out = run_script(&c, dir.path(), "load\n");
        assert!(out.contains("Error: invalid playlist"), "{out}");
        assert!(out.contains("subdirectory"), "{out}");
    }
}
