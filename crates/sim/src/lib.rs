pub mod commands;
pub mod config;
pub mod history;
pub mod printer;
pub mod repl;
