mod args;
mod commands;
mod config_cmd;
mod util;

pub use args::Cli;
