mod agent;
mod cli;
mod client;
mod config;
mod logging;
mod pipeline;
mod render;
mod server;
mod store;
mod structured;

#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.verbose);
    cli.run().await
}
