use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::PathBuf;

use super::builder::ConfigBuilder;
use super::types::LlmProvider;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider_raw) = env_string("BIZFORGE_PROVIDER")? {
        let provider = provider_raw
            .parse::<LlmProvider>()
            .with_context(|| format!("Failed to parse BIZFORGE_PROVIDER value '{provider_raw}'"))?;
        builder = builder.with_provider(provider);
    }

    if let Some(base_url) = env_string("BIZFORGE_LLM_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    if let Some(api_key) = env_string("ANTHROPIC_API_KEY")? {
        builder = builder.with_llm(|llm| {
            if llm.provider == LlmProvider::Anthropic {
                llm.api_key = api_key;
            }
        });
    }

    if let Some(api_key) = env_string("OPENROUTER_API_KEY")? {
        builder = builder.with_llm(|llm| {
            if llm.provider == LlmProvider::OpenRouter {
                llm.api_key = api_key;
            }
        });
    }

    if let Some(timeout) = env_u64("BIZFORGE_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(max_tokens) = env_u32("BIZFORGE_MAX_TOKENS")? {
        builder = builder.with_models(|models| models.max_tokens = max_tokens);
    }

    if let Some(model) = env_string("BIZFORGE_MODEL")? {
        builder = builder.with_models(|models| models.model = model);
    }

    if let Some(host) = env_string("BIZFORGE_HOST")? {
        builder = builder.with_server(|server| server.host = host);
    }

    if let Some(port) = env_u16("PORT")? {
        builder = builder.with_server(|server| server.port = port);
    }

    if let Some(data_file) = env_string("BIZFORGE_DATA_FILE")? {
        builder = builder.with_server(|server| server.data_file = PathBuf::from(data_file));
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_u64(key: &str) -> Result<Option<u64>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {key} as u64"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_u32(key: &str) -> Result<Option<u32>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u32>()
            .with_context(|| format!("Failed to parse {key} as u32"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_u16(key: &str) -> Result<Option<u16>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u16>()
            .with_context(|| format!("Failed to parse {key} as a port number"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
