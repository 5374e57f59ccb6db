//! Parsing of the line-oriented commands typed at the prompt.

/// One prompt command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a playlist directory; `None` means the configured default directory.
    Load(Option<String>),
    /// Play a track; `None` means the current index (or the first track).
    Play(Option<usize>),
    Pause,
    Stop,
    /// Set the mode from an upper-cased token, or list the modes when `None`.
    Mode(Option<String>),
    Next,
    Prev,
    Now,
    List,
    Status,
    Help,
    Exit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Command names are case-insensitive. Everything after `load` is taken as the
/// path so directories with spaces work without quoting.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    let cmd = match word.to_ascii_lowercase().as_str() {
        "load" => Command::Load(arg.map(str::to_string)),
        "play" => match arg {
            None => Command::Play(None),
            Some(a) => a
                .parse::<usize>()
                .map(|i| Command::Play(Some(i)))
                .map_err(|_| format!("Invalid index: {a:?}"))?,
        },
        "pause" => Command::Pause,
        "stop" => Command::Stop,
        "mode" => Command::Mode(arg.map(str::to_ascii_uppercase)),
        "next" => Command::Next,
        "prev" => Command::Prev,
        "now" => Command::Now,
        "list" | "ls" => Command::List,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        _ => return Err("Unknown command. Type 'help' for a list of commands.".to_string()),
    };
    Ok(Some(cmd))
}
