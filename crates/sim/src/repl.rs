use std::fs;

use anyhow::{Context, Result};
use log::debug;
use paging::PagingEngine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::commands::{Command, parse_command};
use crate::history::resolve_history_path;
use crate::printer::{format_json, print_view};

const PROMPT: &str = "pagesim> ";

/// What the REPL should show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    View,
    Json,
    Help,
    Message(String),
    Quit,
}

pub fn run_repl(engine: &mut PagingEngine) -> Result<()> {
    let history_path = resolve_history_path();
    if let Some(parent) = history_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("create history directory")?;
    }

    let mut editor = DefaultEditor::new().context("initialize line editor")?;
    let _ = editor.load_history(&history_path);

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line.trim());

        let Some(command) = parse_command(&line) else {
            eprintln!("Error: unknown command '{}', type help", line.trim());
            continue;
        };
        match execute(engine, command) {
            Ok(Reply::Quit) => break,
            Ok(reply) => show_reply(engine, reply)?,
            Err(err) => eprintln!("Error: {:#}", err),
        }
    }

    let _ = editor.save_history(&history_path);
    Ok(())
}

/// Applies one command to the engine.
///
/// Step targets are clamped to the sequence before the engine sees them.
/// A policy change replays to step 0 so the first reference is shown.
pub fn execute(engine: &mut PagingEngine, command: Command) -> Result<Reply> {
    debug!("executing {}", command);
    let reply = match command {
        Command::Quit => Reply::Quit,
        Command::Help => Reply::Help,
        Command::Show => Reply::View,
        Command::Json => Reply::Json,
        Command::Next => {
            if engine.next_step() {
                Reply::View
            } else {
                Reply::Message("already at the last step".to_string())
            }
        }
        Command::Prev => {
            if engine.prev_step() {
                Reply::View
            } else {
                Reply::Message("already at the first step".to_string())
            }
        }
        Command::First => {
            engine.set_step(0)?;
            Reply::View
        }
        Command::Last => {
            engine.set_step(engine.last_step())?;
            Reply::View
        }
        Command::Step(step) => {
            engine
                .set_step(step.min(engine.last_step()))
                .context("replay to step")?;
            Reply::View
        }
        Command::TogglePolicy => {
            engine.toggle_policy();
            engine.set_step(0)?;
            Reply::View
        }
        Command::SetPolicy(policy) => {
            engine.set_policy(policy);
            engine.set_step(0)?;
            Reply::View
        }
    };
    Ok(reply)
}

fn show_reply(engine: &PagingEngine, reply: Reply) -> Result<()> {
    match reply {
        Reply::View => print_view(&engine.current_view()),
        Reply::Json => println!("{}", format_json(&engine.current_view())?),
        Reply::Help => print_help(),
        Reply::Message(message) => println!("{}", message),
        Reply::Quit => {}
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  next, n            Advance one step");
    println!("  prev, p            Go back one step");
    println!("  step <n>, <n>      Jump to step n (clamped)");
    println!("  first, last        Jump to the first or last step");
    println!("  policy             Toggle between FIFO and LRU");
    println!("  policy fifo|lru    Select a policy");
    println!("  show               Redraw frames and timeline");
    println!("  json               Print the current view as JSON");
    println!("  help               Show this message");
    println!("  quit, exit, \\q     Exit");
}
