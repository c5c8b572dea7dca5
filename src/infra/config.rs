// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider id used in logs and error messages.
    pub name: String,
    /// Base URL of an OpenAI-compatible API (must include the version prefix).
    pub base_url: String,
    /// Model id sent with every request. Overridable via GROQ_MODEL_NAME.
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "groq".into(),
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "llama-3.3-70b-versatile".into(),
            api_key_env: "GROQ_API_KEY".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Accept the earlier-revision affirmations ("oke", "ok", ...) as
    /// finalize triggers in addition to the keyword list.
    pub legacy_confirmations: bool,
    /// Total extraction attempts (first try + repair re-prompts).
    pub max_extract_attempts: u32,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            legacy_confirmations: false,
            max_extract_attempts: 3,
            temperature: 0.3,
            max_tokens: 2048,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: "./projectchat.db".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new("projectchat.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.server.port, 8000);
        assert_eq!(c.provider.name, "groq");
        assert_eq!(c.provider.api_key_env, "GROQ_API_KEY");
        assert_eq!(c.chat.max_extract_attempts, 3);
        assert!(!c.chat.legacy_confirmations);
        assert_eq!(c.store.db_path, "./projectchat.db");
    }

    #[test]
    fn test_partial_toml_uses_section_defaults() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9100

            [chat]
            legacy_confirmations = true
            max_extract_attempts = 2
            temperature = 0.1
            max_tokens = 1024
        "#;
        let c: Config = toml::from_str(toml).unwrap();
        assert_eq!(c.server.port, 9100);
        assert!(c.chat.legacy_confirmations);
        // Untouched sections fall back to defaults
        assert_eq!(c.provider.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(c.store.db_path, "./projectchat.db");
    }
}
