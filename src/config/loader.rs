use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};

use super::Config;
use super::builder::{ConfigBuilder, switch_provider};
use super::environment::apply_env_overrides;
use super::types::{FileConfig, LlmProvider, PersistedConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".bizforge/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Layers defaults, the config file and environment overrides. Credentials
    /// are not checked here; commands that call the model run `validate`.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;
        builder.build()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        file.apply(builder)
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> Result<ConfigBuilder> {
        let mut builder = builder;

        if let Some(provider) = self.llm.provider.as_deref() {
            let parsed = provider
                .parse::<LlmProvider>()
                .context("Invalid provider in config file")?;
            builder = builder.with_provider(parsed);
        }

        let builder = builder.with_llm(|llm| {
            if let Some(api_key) = self.llm.api_key {
                llm.api_key = api_key;
            }
            if let Some(timeout) = self.llm.timeout_secs {
                llm.timeout_secs = timeout;
            }
            if let Some(base_url) = self.llm.base_url {
                llm.base_url = base_url;
            }
            if let Some(user_agent) = self.llm.user_agent {
                llm.user_agent = user_agent;
            }
        });

        let builder = builder.with_models(|models| {
            if let Some(model) = self.models.model {
                models.model = model;
            }
            if let Some(max_tokens) = self.models.max_tokens {
                models.max_tokens = max_tokens;
            }
        });

        Ok(builder.with_server(|server| {
            if let Some(host) = self.server.host {
                server.host = host;
            }
            if let Some(port) = self.server.port {
                server.port = port;
            }
            if let Some(data_file) = self.server.data_file {
                server.data_file = data_file;
            }
        }))
    }
}

impl Config {
    /// Applies a provider switch to an already-built config, as the
    /// `config --provider` command does before saving.
    pub fn set_provider(&mut self, provider: LlmProvider) {
        switch_provider(&mut self.llm, &mut self.models, provider);
    }
}
