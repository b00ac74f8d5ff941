mod runner;
mod prompts;
mod roster;

pub use runner::{Agent, JSON_ONLY_INSTRUCTION};
pub use roster::{AgentRole, AgentRoster};

#[cfg(test)]
mod tests;
