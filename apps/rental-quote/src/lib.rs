//! # Rental Quote CLI Library
//!
//! The shell around `rental-core`: reads catalog and draft files, loads the
//! pricing configuration and renders results for stdout.
//!
//! ## Module Organization
//! ```text
//! rental_quote/
//! ├── lib.rs          ◄─── You are here (CLI definition & dispatch)
//! ├── settings.rs     ◄─── PricingConfig from defaults, TOML and env
//! ├── catalog.rs      ◄─── Catalog file, lookup and authoring checks
//! ├── draft.rs        ◄─── Draft file ──► priced Quote
//! ├── commands.rs     ◄─── One handler per subcommand
//! └── error.rs        ◄─── CliError
//! ```
//!
//! ## Output Channels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout ──► command result only (JSON or TOML), safe to pipe           │
//! │  stderr ──► tracing logs, filtered by RUST_LOG                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod commands;
pub mod draft;
pub mod error;
pub mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

#[derive(Debug, Parser)]
#[command(
    name = "rental-quote",
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "(Optional) Pricing config file. \
                Defaults to pricing.toml in the platform config dir."
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prices a quote draft and prints the quote as JSON.
    Price {
        #[arg(long, help = "Catalog JSON file.")]
        catalog: PathBuf,
        #[arg(long, help = "Quote draft JSON file.")]
        draft: PathBuf,
    },

    /// Prints the day rate an item gets for a rental length.
    Resolve {
        #[arg(long, help = "Catalog JSON file.")]
        catalog: PathBuf,
        #[arg(long, help = "Catalog item id.")]
        item: String,
        #[arg(
            long,
            default_value = "1",
            allow_hyphen_values = true,
            help = "Rental length in days."
        )]
        days: String,
    },

    /// Validates pricing tiers and reports discount warnings.
    CheckCatalog {
        #[arg(long, help = "Catalog JSON file.")]
        catalog: PathBuf,
    },

    /// Prints the effective pricing configuration as TOML.
    Config,
}

/// Runs one command and returns what it prints.
///
/// For `check-catalog` the report is returned even when the catalog is
/// invalid; the error is handed back separately.
pub fn run(cli: Cli) -> CliResult<(String, CliResult<()>)> {
    let config = settings::load(cli.config)?;

    Ok(match cli.command {
        Command::Price { catalog, draft } => {
            (commands::price(&catalog, &draft, &config)?, Ok(()))
        }
        Command::Resolve {
            catalog,
            item,
            days,
        } => (
            commands::resolve(&catalog, &item, &days, &config)?,
            Ok(()),
        ),
        Command::CheckCatalog { catalog } => commands::check_catalog(&catalog),
        Command::Config => (commands::show_config(&config)?, Ok(())),
    })
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rental_core=trace` - Trace the pricing engine only
/// - Default: INFO, DEBUG for the `rental_*` crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rental=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
