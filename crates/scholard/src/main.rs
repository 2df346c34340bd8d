//! Command line access to the `scholar` arXiv tools.
//!
//! Each subcommand runs one of the library's handlers and renders the result:
//!
//! - `today`: papers submitted to a category today, or on the latest day that has any
//! - `weekly`: papers submitted to a category over the last seven days
//! - `search`: a relevance-ranked arXiv query
//! - `download`: a paper's LaTeX and BibTeX sources as one text
//!
//! # Usage
//!
//! ```bash
//! # What landed in cryptography today
//! scholar today cs.CR
//!
//! # The week in number theory, as JSON
//! scholar --json weekly math.NT
//!
//! # Search titles and abstracts
//! scholar search 'ti:"homomorphic encryption" AND abs:lattice'
//!
//! # Save a paper's sources
//! scholar download 2301.07041 --output fhe.tex
//! ```
//!
//! Settings are read from `--config`, or from the platform configuration directory when
//! that flag is absent; a missing file means defaults. Logging goes to stderr and is raised
//! with `-v` or overridden through `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Parser};
use console::style;
use scholar::{prelude::*, ArxivClient, Config, Tools};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Browse, search and fetch arXiv papers")]
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

  /// Path to the configuration file. If not specified, uses the default platform-specific
  /// configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Print results as JSON instead of a styled summary
  #[arg(long, global = true)]
  json: bool,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// Output goes to stderr so that results on stdout stay machine readable.
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
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Loads the configuration, builds the handlers and runs the requested command.
async fn run(cli: &Cli, terminal: &Terminal) -> Result<()> {
  let path = cli.config.clone().unwrap_or_else(Config::default_path);
  trace!("Using configuration at: {}", path.display());
  let config = Config::load_or_default(&path)?;
  debug!("Loaded configuration: {config:?}");

  let tools = Tools::new(ArxivClient::new(&config.catalog)?, config);

  match &cli.command {
    Commands::Today { category } => today(&tools, terminal, category).await,
    Commands::Weekly { category } => weekly(&tools, terminal, category).await,
    Commands::Search { query } => search(&tools, terminal, query).await,
    Commands::Download { paper_id, output } =>
      download(&tools, terminal, paper_id, output.as_deref()).await,
  }
}

/// Entry point for the `scholar` CLI application
///
/// Parses arguments, sets up logging and executes the requested command. Any error is
/// reported on stderr and turns into a failing exit status.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let terminal = Terminal::new(cli.json);
  match run(&cli, &terminal).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      terminal.report(&e);
      ExitCode::FAILURE
    },
  }
}
