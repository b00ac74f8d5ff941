//! Configuration management for the bizforge service.
//!
//! Settings are layered in this order, later layers winning:
//! - built-in defaults
//! - the JSON file at `~/.bizforge/config`
//! - environment variables
//! - command-line flags (applied by the CLI)

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use types::{Config, LlmProvider, LlmSettings, ModelSettings, ServerSettings};

pub use constants::ANTHROPIC_API_VERSION;

#[cfg(test)]
mod tests;
