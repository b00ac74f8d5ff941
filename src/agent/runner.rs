use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::client::DynCompletionClient;
use crate::structured;

/// Instruction appended to every structured task.
pub const JSON_ONLY_INSTRUCTION: &str = "\n\nRespond with valid JSON only.";

/// A fixed system prompt bound to a completion client.
#[derive(Clone)]
pub struct Agent {
    name: &'static str,
    system_prompt: &'static str,
    client: Arc<DynCompletionClient>,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent").field("name", &self.name).finish()
    }
}

impl Agent {
    pub fn new(
        name: &'static str,
        system_prompt: &'static str,
        client: Arc<DynCompletionClient>,
    ) -> Self {
        Self {
            name,
            system_prompt,
            client,
        }
    }

    /// Sends `task`, prefixed by `context` when one is given, and returns the
    /// model text untouched.
    pub async fn run(&self, task: &str, context: &str) -> Result<String> {
        let prompt = user_prompt(task, context);
        tracing::debug!(agent = self.name, prompt_chars = prompt.len(), "agent call");

        self.client
            .complete(self.system_prompt, &prompt)
            .await
            .with_context(|| format!("{} completion failed", self.name))
    }

    /// Like `run`, but asks for JSON and recovers a structured value from
    /// whatever comes back. Only transport failures are errors.
    pub async fn run_json(&self, task: &str, context: &str) -> Result<Value> {
        let task = format!("{task}{JSON_ONLY_INSTRUCTION}");
        let text = self.run(&task, context).await?;
        let (value, step) = structured::recover(&text);

        if step == structured::RecoveryStep::RawFallback {
            tracing::warn!(agent = self.name, "no JSON in response, keeping raw text");
        } else {
            tracing::debug!(agent = self.name, ?step, "structured response recovered");
        }

        Ok(value)
    }
}

pub(crate) fn user_prompt(task: &str, context: &str) -> String {
    if context.is_empty() {
        task.to_string()
    } else {
        format!("{context}\n\n{task}")
    }
}
