use std::fmt;

use paging::Policy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Show,
    Json,
    Next,
    Prev,
    First,
    Last,
    Step(usize),
    TogglePolicy,
    SetPolicy(Policy),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Quit => write!(f, "quit"),
            Command::Help => write!(f, "help"),
            Command::Show => write!(f, "show"),
            Command::Json => write!(f, "json"),
            Command::Next => write!(f, "next"),
            Command::Prev => write!(f, "prev"),
            Command::First => write!(f, "first"),
            Command::Last => write!(f, "last"),
            Command::Step(step) => write!(f, "step {}", step),
            Command::TogglePolicy => write!(f, "policy"),
            Command::SetPolicy(policy) => write!(f, "policy {}", policy),
        }
    }
}

pub fn parse_command(input: &str) -> Option<Command> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    match lower.as_str() {
        "\\q" | "q" | "quit" | "exit" => return Some(Command::Quit),
        "\\help" | "help" | "?" => return Some(Command::Help),
        "show" | "s" => return Some(Command::Show),
        "json" => return Some(Command::Json),
        "next" | "n" => return Some(Command::Next),
        "prev" | "p" | "previous" => return Some(Command::Prev),
        "first" => return Some(Command::First),
        "last" => return Some(Command::Last),
        "policy" | "toggle" => return Some(Command::TogglePolicy),
        _ => {}
    }

    if let Some(rest) = lower.strip_prefix("step ") {
        return rest.trim().parse().ok().map(Command::Step);
    }
    if let Some(rest) = lower.strip_prefix("policy ") {
        return rest.parse().ok().map(Command::SetPolicy);
    }
    lower.parse().ok().map(Command::Step)
}
