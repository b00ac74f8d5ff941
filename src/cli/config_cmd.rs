use anyhow::Result;
use colored::*;

use crate::config::{Config, LlmProvider};

use super::args::ConfigArgs;
use super::util::mask_api_key;

pub(crate) fn handle_config(args: ConfigArgs, mut config: Config) -> Result<()> {
    if let Some(ref provider) = args.provider {
        let provider: LlmProvider = provider.parse()?;
        config.set_provider(provider);
    }

    if let Some(api_key) = args.api_key {
        config.llm.api_key = api_key;
    }

    if let Some(model) = args.model {
        config.models.model = model;
    }

    if let Some(timeout) = args.timeout {
        config.llm.timeout_secs = timeout;
    }

    if let Some(max_tokens) = args.max_tokens {
        config.models.max_tokens = max_tokens;
    }

    config.save()?;

    println!(
        "{} {}",
        "✅ Configuration saved to".green(),
        Config::config_path()?.display()
    );
    println!("📋 Current configuration:");
    println!("   Provider: {}", config.llm.provider.display_name());
    println!("   API Key: {}", mask_api_key(&config.llm.api_key));
    println!("   Model: {}", config.models.model);
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!("   Max Tokens: {}", config.models.max_tokens);

    Ok(())
}
