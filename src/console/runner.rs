use crate::controller::{Clipboard, KeyValueStore, UiController};
use std::fs;
use std::io::{self, BufRead, Write};
use tracing::debug;

const HELP: &str = "Commands: (p)rint, (a)ppend <line>, (o)pen <path>, (w)rite <path>, \
(s)lash [on|off], (c)opy, (r)eset, (q)uit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Print,
    /// Raw text after the first space, leading whitespace kept.
    Append(String),
    Open(String),
    Write(String),
    Slash(Option<bool>),
    Copy,
    Reset,
    Help,
    Quit,
    Invalid(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

        match word {
            "" | "p" | "print" => ConsoleCommand::Print,
            "a" | "append" => {
                if rest.trim().is_empty() {
                    ConsoleCommand::Invalid("append needs a line".to_string())
                } else {
                    ConsoleCommand::Append(rest.to_string())
                }
            }
            "o" | "open" => match single_path(rest) {
                Ok(path) => ConsoleCommand::Open(path),
                Err(msg) => ConsoleCommand::Invalid(msg),
            },
            "w" | "write" => match single_path(rest) {
                Ok(path) => ConsoleCommand::Write(path),
                Err(msg) => ConsoleCommand::Invalid(msg),
            },
            "s" | "slash" => match rest.trim() {
                "" => ConsoleCommand::Slash(None),
                "on" => ConsoleCommand::Slash(Some(true)),
                "off" => ConsoleCommand::Slash(Some(false)),
                other => ConsoleCommand::Invalid(format!("slash takes on or off, got {other}")),
            },
            "c" | "copy" => ConsoleCommand::Copy,
            "r" | "reset" => ConsoleCommand::Reset,
            "h" | "help" | "?" => ConsoleCommand::Help,
            "q" | "quit" => ConsoleCommand::Quit,
            other => ConsoleCommand::Invalid(format!("Unknown command: {other}")),
        }
    }
}

/// Split a path argument with shell quoting so names with spaces work.
fn single_path(rest: &str) -> Result<String, String> {
    let parts = shlex::split(rest).ok_or_else(|| "unbalanced quotes".to_string())?;
    match parts.as_slice() {
        [path] => Ok(path.clone()),
        [] => Err("missing path".to_string()),
        _ => Err("expected exactly one path".to_string()),
    }
}

/// Prompt loop. Trees go to `out`; prompts and messages go to `err`.
pub fn run_console<S, C, R, O, E>(
    ui: &mut UiController<S, C>,
    input: R,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    S: KeyValueStore,
    C: Clipboard,
    R: BufRead,
    O: Write,
    E: Write,
{
    writeln!(err, "{HELP}")?;
    let mut lines = input.lines();

    loop {
        write!(err, "> ")?;
        err.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let command = ConsoleCommand::parse(&line);
        debug!(?command, "console command");

        match command {
            ConsoleCommand::Print => write!(out, "{}", ui.output())?,
            ConsoleCommand::Append(text) => {
                ui.append_line(&text);
                write!(out, "{}", ui.output())?;
            }
            ConsoleCommand::Open(path) => match fs::read_to_string(&path) {
                Ok(text) => {
                    ui.set_input(text);
                    write!(out, "{}", ui.output())?;
                }
                Err(e) => writeln!(err, "Could not read {path}: {e}")?,
            },
            ConsoleCommand::Write(path) => match fs::write(&path, ui.output()) {
                Ok(()) => writeln!(err, "Wrote {path}")?,
                Err(e) => writeln!(err, "Could not write {path}: {e}")?,
            },
            ConsoleCommand::Slash(value) => {
                match value {
                    Some(on) => ui.set_append_slash(on),
                    None => ui.toggle_append_slash(),
                }
                let state = if ui.append_slash() { "on" } else { "off" };
                writeln!(err, "Directory slash {state}")?;
                write!(out, "{}", ui.output())?;
            }
            ConsoleCommand::Copy => {
                // Failure is reported through the status line below.
                let _ = ui.copy();
            }
            ConsoleCommand::Reset => {
                ui.reset();
                write!(out, "{}", ui.output())?;
            }
            ConsoleCommand::Help => writeln!(err, "{HELP}")?,
            ConsoleCommand::Quit => break,
            ConsoleCommand::Invalid(msg) => writeln!(err, "{msg}")?,
        }
        out.flush()?;

        if let Some(status) = ui.take_status() {
            writeln!(err, "{status}")?;
        }
    }

    Ok(())
}
