use std::path::PathBuf;

use super::constants::*;
use super::types::{LlmProvider, LlmSettings, ModelSettings, ServerSettings};

pub fn default_user_agent() -> String {
    format!("bizforge/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        let provider = LlmProvider::Anthropic;
        Self {
            provider,
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: provider.default_base_url().to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: LlmProvider::Anthropic.default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}
