//! Application configuration types for Folio.
//!
//! `AppConfig` represents the `config.toml` in the data directory. Every
//! field has a default, so an empty or missing file yields a working setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.folio/config.toml` (or `$FOLIO_DATA_DIR/config.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub llm: LlmSettings,
}

/// HTTP listener settings. CLI flags override these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database location. `None` means `{data_dir}/folio.db`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// Chat-completion settings for the portfolio assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Fallback API key. `FOLIO_LLM_API_KEY` / `OPENROUTER_API_KEY` take precedence.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_penalty")]
    pub presence_penalty: f64,

    #[serde(default = "default_penalty")]
    pub frequency_penalty: f64,

    /// Number of prior messages replayed to the model.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// Number of public projects included in the prompt context.
    #[serde(default = "default_project_limit")]
    pub project_limit: u32,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "mistralai/mistral-7b-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f64 {
    0.7
}

fn default_penalty() -> f64 {
    0.1
}

fn default_history_limit() -> u32 {
    10
}

fn default_project_limit() -> u32 {
    10
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            presence_penalty: default_penalty(),
            frequency_penalty: default_penalty(),
            history_limit: default_history_limit(),
            project_limit: default_project_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.llm.model, "mistralai/mistral-7b-instruct");
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.llm.history_limit, 10);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.presence_penalty, 0.1);
    }

    #[test]
    fn test_app_config_deserialize_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
[server]
port = 9090

[llm]
model = "openai/gpt-4o-mini"
history_limit = 4
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.model, "openai/gpt-4o-mini");
        assert_eq!(config.llm.history_limit, 4);
        assert_eq!(config.llm.max_tokens, 2000);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("sk-or-secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("sk-or-secret"));
    }
}
