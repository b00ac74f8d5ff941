use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::ServerSettings;

use super::commands;

/// Entry point for the `bizforge` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "bizforge",
    about = "Agent pipelines that research, package and market a micro-business niche",
    version,
    long_about = None
)]
pub struct Cli {
    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Run the full five-stage build for a niche and store the result.
    Build(BuildArgs),
    /// Print statistics for the stored business.
    Stats(DataFileArgs),
    /// Update and save ~/.bizforge/config.
    Config(ConfigArgs),
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub data: DataFileArgs,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Market to build a business for
    #[arg(long)]
    pub niche: String,

    /// Number of leads to discover
    #[arg(long)]
    pub count: Option<u32>,

    #[command(flatten)]
    pub data: DataFileArgs,
}

#[derive(Debug, Default, Args)]
pub struct DataFileArgs {
    /// Business state file
    #[arg(long = "data-file")]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// LLM provider (anthropic or openrouter)
    #[arg(long)]
    pub provider: Option<String>,

    /// Set the API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the model
    #[arg(long)]
    pub model: Option<String>,

    /// Set timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set max tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl ServeArgs {
    pub fn apply(&self, server: &mut ServerSettings) {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        self.data.apply(server);
    }
}

impl DataFileArgs {
    pub fn apply(&self, server: &mut ServerSettings) {
        if let Some(data_file) = &self.data_file {
            server.data_file = data_file.clone();
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
