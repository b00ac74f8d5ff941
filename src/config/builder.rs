use anyhow::Result;

use super::types::{Config, LlmProvider, LlmSettings, ModelSettings, ServerSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) models: ModelSettings,
    pub(super) server: ServerSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            models: ModelSettings::default(),
            server: ServerSettings::default(),
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_server<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ServerSettings),
    {
        update(&mut self.server);
        self
    }

    /// Switches provider, resetting the endpoint and model to that provider's
    /// defaults. A no-op when the provider is unchanged.
    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        switch_provider(&mut self.llm, &mut self.models, provider);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            llm: self.llm,
            models: self.models,
            server: self.server,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn switch_provider(
    llm: &mut LlmSettings,
    models: &mut ModelSettings,
    provider: LlmProvider,
) {
    if llm.provider == provider {
        return;
    }
    llm.provider = provider;
    llm.base_url = provider.default_base_url().to_string();
    models.model = provider.default_model().to_string();
}
