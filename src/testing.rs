//! Deterministic completion client for exercising agents and pipelines.

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::agent::AgentRole;
use crate::client::CompletionClient;

type Responder = dyn Fn(&str, &str) -> Result<String> + Send + Sync;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub system: String,
    pub prompt: String,
}

pub(crate) struct ScriptedClient {
    responder: Box<Responder>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn constant(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    /// Answers each role with its scripted text, everything else with
    /// `fallback`.
    pub fn by_role(responses: &[(AgentRole, &str)], fallback: &str) -> Self {
        let responses: Vec<(&'static str, String)> = responses
            .iter()
            .map(|(role, text)| (role.system_prompt(), text.to_string()))
            .collect();
        let fallback = fallback.to_string();
        Self::new(move |system, _| {
            Ok(responses
                .iter()
                .find(|(prompt, _)| *prompt == system)
                .map(|(_, text)| text.clone())
                .unwrap_or_else(|| fallback.clone()))
        })
    }

    /// Fails every call made by `role`; other roles get `{}`.
    pub fn failing_for(role: AgentRole) -> Self {
        Self::new(move |system, _| {
            if system == role.system_prompt() {
                Err(anyhow!("provider unavailable"))
            } else {
                Ok("{}".to_string())
            }
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, role: AgentRole) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.system == role.system_prompt())
            .collect()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });
        (self.responder)(system, prompt)
    }
}
