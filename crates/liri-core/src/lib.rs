//! Concert, song and movie lookups for the command line.
//!
//! A command token is routed by [`dispatch::Dispatcher`] to one provider
//! lookup, or to the replay file when the token is `do-what-it-says` or
//! unknown. Results and failures are printed through [`output::Printer`],
//! which mirrors every line into a size-rotated log file.

pub mod classify;
pub mod cli;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logfile;
pub mod model;
pub mod output;
pub mod providers;
pub mod query;
pub mod replay;
pub mod telemetry;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::output::Printer;
use crate::providers::LiveProviders;

/// Resolve configuration, run one command, and print the outcome.
pub async fn run(cli: Cli) -> Result<()> {
    telemetry::init();
    let config = Config::try_from_args(&cli)?;
    let providers = LiveProviders::new(&config).context("failed to build HTTP client")?;
    let mut printer = Printer::stdout(config.log.clone());
    let dispatcher = Dispatcher::new(providers, config.replay_file.clone());

    let term = cli.search_term();
    dispatcher
        .dispatch(cli.command.as_deref(), &term, &mut printer)
        .await;
    Ok(())
}
