//! # rental-quote
//!
//! Command-line entry point. Setup and dispatch live in `lib.rs`.
//!
//! ```text
//! rental-quote price --catalog catalog.json --draft draft.json
//! rental-quote resolve --catalog catalog.json --item GEN-100 --days 5
//! rental-quote check-catalog --catalog catalog.json
//! rental-quote --config pricing.toml config
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rental_quote::{init_tracing, run, Cli};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    info!(command = ?cli.command, "Starting rental-quote");

    let (output, outcome) = run(cli).context("rental-quote failed")?;
    if !output.is_empty() {
        println!("{}", output);
    }
    outcome.context("catalog check failed")?;

    Ok(())
}
