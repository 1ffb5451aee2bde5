//! Command line front end for the shelf paper filing library.
//!
//! Files a paper in one go: downloads the PDF into the papers directory, commits
//! and pushes it, and pins a card for it on a Kinopio board.
//!
//! # Usage
//!
//! ```bash
//! # Write a starter configuration
//! shelf init
//!
//! # File a paper, answering the prompts for URL, title and category
//! shelf
//!
//! # Or pass everything up front
//! shelf add --url https://arxiv.org/pdf/1706.03762 --title "Attention Is All You Need" \
//!   --category NLP
//! ```
//!
//! Logging is controlled with `-v` (repeatable) or `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use shelf::{
  config::{BoardConfig, Config},
  pipeline::{Filing, Pipeline},
  PaperRequest,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Download a paper, push it to git and pin it to a Kinopio board")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. Defaults to the platform configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Skip all confirmations and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,

  /// The subcommand to execute; filing a paper when omitted
  #[command(subcommand)]
  command: Option<Commands>,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Entry point for the shelf CLI
///
/// Any error is reported once and ends the process with exit code 1.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let interaction = TerminalInteraction::new(cli.accept_defaults);
  let config_path = match cli.config.clone() {
    Some(path) => path,
    None => Config::default_path()?,
  };
  trace!("Using configuration at {}", config_path.display());

  let command = cli.command.unwrap_or_else(|| Commands::Add(AddArgs::default()));
  let result = match command {
    Commands::Add(add_args) => match Config::from_path(&config_path) {
      Ok(config) => add(&interaction, config, add_args).await.map(|_| ()),
      Err(e) => Err(e.into()),
    },
    Commands::Init(init_args) => init(&interaction, &config_path, init_args).map(|_| ()),
  };

  if let Err(e) = &result {
    interaction.reply(ResponseContent::Error(e))?;
    std::process::exit(1);
  }
  Ok(())
}
