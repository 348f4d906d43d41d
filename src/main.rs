//! Simprint CLI: print a simhash fingerprint for every document matching a glob.

use anyhow::Result;
use clap::Parser;
use simprint::engine::arg_parser::Cli;
use simprint::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
