use anyhow::Result;
use clap::Parser;

use liri_core::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    liri_core::run(cli).await
}
