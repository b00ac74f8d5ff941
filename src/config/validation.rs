use anyhow::{Result, anyhow};

use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        let provider = config.llm.provider;
        return Err(anyhow!(
            "{} API key not found. Set {} or run `bizforge config --api-key <key>`",
            provider.display_name(),
            provider.api_key_env_var(),
        ));
    }

    if config.models.max_tokens == 0 {
        return Err(anyhow!("max_tokens must be greater than zero"));
    }

    Ok(())
}
