//! `aura chat` interactive loop.

use crate::backend::{ChatBackend, HttpBackend};
use crate::cli::render::{render_message, render_session_list, render_transcript};
use crate::cli::{at_position, open_manager, to_index};
use crate::config::Config;
use crate::core::{ManagerEvent, SessionManager};
use crate::error::Result;
use crate::storage::SessionStore;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Type a message and press Enter to send it. Commands:
  /new              start a new chat
  /list             list chats
  /select N         switch to chat N
  /rename N NAME    rename chat N
  /delete N         delete chat N
  /show             reprint the current chat
  /help             show this help
  /quit             leave";

/// A parsed line of input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    New,
    List,
    Select(usize),
    Rename(usize, &'a str),
    Delete(usize),
    Show,
    Help,
    Quit,
    Invalid(&'a str),
}

/// Parse one line of input.
fn parse_input(line: &str) -> Input<'_> {
    let Some(command) = line.trim().strip_prefix('/') else {
        return Input::Message(line);
    };
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, r)| (n, r.trim()));

    match name {
        "new" => Input::New,
        "list" => Input::List,
        "show" => Input::Show,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        "select" => rest.parse().map_or(Input::Invalid(line), Input::Select),
        "delete" => rest.parse().map_or(Input::Invalid(line), Input::Delete),
        "rename" => {
            let (position, new_name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            position
                .parse()
                .map_or(Input::Invalid(line), |p| Input::Rename(p, new_name))
        }
        _ => Input::Invalid(line),
    }
}

/// Run the interactive chat.
///
/// # Errors
///
/// Returns an error if the storage backend fails or the terminal cannot be
/// read or written.
pub fn run(config: &Config) -> Result<()> {
    let mut manager = open_manager(config)?;
    let backend = HttpBackend::new(&config.backend)?;

    manager.subscribe(|event: &ManagerEvent| {
        if *event == (ManagerEvent::PendingChanged { waiting: true }) {
            eprintln!("(aura is typing...)");
        }
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_loop(&mut manager, &backend, stdin.lock(), &mut stdout)
}

/// Drive the chat from `input` until EOF or `/quit`.
fn run_loop<S: SessionStore>(
    manager: &mut SessionManager<S>,
    backend: &impl ChatBackend,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    print_current(manager, out)?;
    writeln!(out, "(/help for commands)")?;

    for line in input.lines() {
        let line = line?;
        if !handle_line(manager, backend, &line, out)? {
            break;
        }
        out.flush()?;
    }
    Ok(())
}

/// Handle one line. Returns `false` when the user asked to quit.
fn handle_line<S: SessionStore>(
    manager: &mut SessionManager<S>,
    backend: &impl ChatBackend,
    line: &str,
    out: &mut impl Write,
) -> Result<bool> {
    match parse_input(line) {
        Input::Message(text) => {
            if let Some(reply) = manager.send(text, backend)? {
                writeln!(out, "{}", render_message(&reply))?;
            }
        }
        Input::New => {
            manager.create_session()?;
            print_current(manager, out)?;
        }
        Input::List => {
            writeln!(
                out,
                "{}",
                render_session_list(manager.sessions(), manager.active_index())
            )?;
        }
        Input::Select(position) => {
            if report(out, select(manager, position))? {
                print_current(manager, out)?;
            }
        }
        Input::Rename(position, name) => {
            let renamed = to_index(position)
                .and_then(|i| at_position(position, manager.rename_session(i, name)));
            if let Some(false) = report_value(out, renamed)? {
                writeln!(out, "Name is empty; nothing changed.")?;
            }
        }
        Input::Delete(position) => {
            let deleted =
                to_index(position).and_then(|i| at_position(position, manager.delete_session(i)));
            if report(out, deleted)? {
                print_current(manager, out)?;
            }
        }
        Input::Show => print_current(manager, out)?,
        Input::Help => writeln!(out, "{HELP}")?,
        Input::Quit => return Ok(false),
        Input::Invalid(raw) => writeln!(out, "Unrecognized command: {}", raw.trim())?,
    }
    Ok(true)
}

fn select<S: SessionStore>(manager: &mut SessionManager<S>, position: usize) -> Result<()> {
    let index = to_index(position)?;
    at_position(position, manager.select_session(index))
}

/// Print position errors inline; storage errors still propagate.
fn report(out: &mut impl Write, result: Result<()>) -> Result<bool> {
    Ok(report_value(out, result)?.is_some())
}

fn report_value<T>(out: &mut impl Write, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ crate::Error::InvalidIndex(_)) => {
            writeln!(out, "{e}")?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn print_current<S: SessionStore>(
    manager: &SessionManager<S>,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(session) = manager.active_session() {
        writeln!(out, "{}", render_transcript(session))?;
    }
    Ok(())
}
