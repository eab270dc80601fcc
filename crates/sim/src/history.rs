use std::env;
use std::path::PathBuf;

const PROJECT_DIR: &str = "pagesim";

/// Location of the REPL line history, following the XDG state directory.
pub fn resolve_history_path() -> PathBuf {
    resolve_history_path_with(|key| env::var(key).ok())
}

pub fn resolve_history_path_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(state_dir) = lookup("XDG_STATE_HOME") {
        return PathBuf::from(state_dir).join(PROJECT_DIR).join("history");
    }
    if let Some(home) = lookup("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join(PROJECT_DIR)
            .join("history");
    }
    PathBuf::from(".pagesim_history")
}
