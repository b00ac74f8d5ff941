use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tempfile::TempDir;

use super::builder::ConfigBuilder;
use super::constants::{
    DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL, DEFAULT_PORT,
};
use super::environment::{env_string, env_u16, env_u32, env_u64};
use super::{Config, LlmProvider};

const MANAGED_VARS: &[&str] = &[
    "BIZFORGE_PROVIDER",
    "BIZFORGE_LLM_BASE_URL",
    "ANTHROPIC_API_KEY",
    "OPENROUTER_API_KEY",
    "BIZFORGE_TIMEOUT_SECS",
    "BIZFORGE_MAX_TOKENS",
    "BIZFORGE_MODEL",
    "BIZFORGE_HOST",
    "PORT",
    "BIZFORGE_DATA_FILE",
];

fn env_lock<'a>() -> std::sync::MutexGuard<'a, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let saved = vars
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect::<Vec<_>>();
        for (key, value) in vars {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        Self { saved }
    }

    /// Points HOME at `home`, clears every variable the loader reads and then
    /// applies `overrides`.
    fn isolated(home: &str, overrides: &[(&str, Option<&str>)]) -> Self {
        let mut vars: Vec<(&str, Option<&str>)> = vec![("HOME", Some(home))];
        for key in MANAGED_VARS {
            let value = overrides
                .iter()
                .find(|(name, _)| name == key)
                .and_then(|(_, value)| *value);
            vars.push((key, value));
        }
        Self::new(&vars)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn home_of(temp: &TempDir) -> String {
    temp.path().to_str().unwrap().to_string()
}

#[test]
fn defaults_target_anthropic_haiku() {
    let config = ConfigBuilder::new().build().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::Anthropic);
    assert_eq!(config.models.model, DEFAULT_ANTHROPIC_MODEL);
    assert_eq!(config.models.max_tokens, 4096);
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.server.data_file, PathBuf::from("business.json"));
}

#[test]
fn load_from_env_only() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = home_of(&temp_home);

    let _env = EnvGuard::isolated(
        &home,
        &[
            ("ANTHROPIC_API_KEY", Some("env-key")),
            ("BIZFORGE_TIMEOUT_SECS", Some("45")),
            ("BIZFORGE_MAX_TOKENS", Some("2048")),
            ("BIZFORGE_MODEL", Some("env-model")),
            ("PORT", Some("9090")),
        ],
    );

    let config = Config::load().unwrap();
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 45);
    assert_eq!(config.models.max_tokens, 2048);
    assert_eq!(config.models.model, "env-model");
    assert_eq!(config.server.port, 9090);
}

#[test]
fn load_prefers_env_over_file() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = home_of(&temp_home);
    let config_dir = temp_home.path().join(".bizforge");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config"),
        r#"{
            "llm": { "api_key": "file-key", "timeout_secs": 20 },
            "models": { "model": "file-model", "max_tokens": 1024 },
            "server": { "data_file": "/tmp/file-business.json" }
        }"#,
    )
    .unwrap();

    let _env = EnvGuard::isolated(
        &home,
        &[
            ("ANTHROPIC_API_KEY", Some("env-key")),
            ("BIZFORGE_TIMEOUT_SECS", Some("40")),
            ("BIZFORGE_MODEL", Some("env-model")),
        ],
    );

    let config = Config::load().unwrap();
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 40);
    assert_eq!(config.models.max_tokens, 1024);
    assert_eq!(config.models.model, "env-model");
    assert_eq!(
        config.server.data_file,
        PathBuf::from("/tmp/file-business.json")
    );
}

#[test]
fn validate_errors_without_api_key() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = home_of(&temp_home);
    let _env = EnvGuard::isolated(&home, &[]);

    let config = Config::load().unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Anthropic API key not found"));
    assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
}

#[test]
fn load_supports_openrouter_provider() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = home_of(&temp_home);

    let _env = EnvGuard::isolated(
        &home,
        &[
            ("BIZFORGE_PROVIDER", Some("openrouter")),
            ("OPENROUTER_API_KEY", Some("or-key")),
            ("ANTHROPIC_API_KEY", Some("ignored")),
        ],
    );

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::OpenRouter);
    assert_eq!(config.llm.api_key, "or-key");
    assert_eq!(config.llm.base_url, DEFAULT_OPENROUTER_BASE_URL);
    assert_eq!(config.models.model, DEFAULT_OPENROUTER_MODEL);
    config.validate().unwrap();
}

#[test]
fn load_rejects_unknown_provider_in_file() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = home_of(&temp_home);
    let config_dir = temp_home.path().join(".bizforge");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config"), r#"{"llm": {"provider": "mystery"}}"#).unwrap();

    let _env = EnvGuard::isolated(&home, &[]);

    let err = Config::load().unwrap_err();
    assert!(format!("{err:#}").contains("Unknown LLM provider"));
}

#[test]
fn save_persists_nested_structure() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = home_of(&temp_home);
    let _env = EnvGuard::isolated(&home, &[]);

    let mut config = Config::builder().build().unwrap();
    config.llm.api_key = "test-key".to_string();
    config.llm.timeout_secs = 55;
    config.models.max_tokens = 999;
    config.set_provider(LlmProvider::OpenRouter);
    config.save().unwrap();

    let persisted = std::fs::read_to_string(Config::config_path().unwrap()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&persisted).unwrap();
    assert_eq!(json["llm"]["api_key"], "test-key");
    assert_eq!(json["llm"]["provider"], "openrouter");
    assert_eq!(json["llm"]["timeout_secs"], 55);
    assert_eq!(json["models"]["model"], DEFAULT_OPENROUTER_MODEL);
    assert_eq!(json["models"]["max_tokens"], 999);

    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.llm.provider, LlmProvider::OpenRouter);
    assert_eq!(reloaded.models.max_tokens, 999);
}

#[test]
fn test_env_parsers() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[
        ("BIZFORGE_TEST_STR", Some("value")),
        ("BIZFORGE_TEST_U64", Some("123")),
        ("BIZFORGE_TEST_U32", Some("456")),
        ("BIZFORGE_TEST_PORT", Some("70000")),
    ]);

    assert_eq!(
        env_string("BIZFORGE_TEST_STR").unwrap(),
        Some("value".to_string())
    );
    assert_eq!(env_u64("BIZFORGE_TEST_U64").unwrap(), Some(123));
    assert_eq!(env_u32("BIZFORGE_TEST_U32").unwrap(), Some(456));
    assert!(env_u16("BIZFORGE_TEST_PORT").is_err());
    assert_eq!(env_string("BIZFORGE_TEST_MISSING").unwrap(), None);
}
