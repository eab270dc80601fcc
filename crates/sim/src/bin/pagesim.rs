use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use paging::PagingEngine;
use sim::config::{Args, SimConfig};
use sim::printer::{format_json, print_view};
use sim::repl::run_repl;

fn main() -> Result<()> {
    env_logger::init();

    let config = SimConfig::resolve(Args::parse())?;
    info!(
        "starting with {} frames, {} references, policy {}",
        config.total_frames,
        config.sequence.len(),
        config.policy
    );

    let mut engine = PagingEngine::new(config.total_frames, config.sequence, config.policy)
        .context("configure paging engine")?;
    engine.set_step(config.step)?;

    if config.json {
        println!("{}", format_json(&engine.current_view())?);
        return Ok(());
    }

    println!("pagesim v{}", env!("CARGO_PKG_VERSION"));
    println!("Type help for commands.");
    print_view(&engine.current_view());
    run_repl(&mut engine)
}
