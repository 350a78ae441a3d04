//! Configuration loading for Folio.
//!
//! Reads `config.toml` from the data directory (`~/.folio/` by default) into
//! [`AppConfig`], falling back to defaults when the file is missing or
//! malformed. The LLM API key is resolved separately so it can come from the
//! environment without touching the file.

use std::path::{Path, PathBuf};

use folio_types::config::{AppConfig, LlmSettings};
use secrecy::SecretString;

/// Environment variables checked for the LLM API key, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["FOLIO_LLM_API_KEY", "OPENROUTER_API_KEY"];

const DATA_DIR_ENV: &str = "FOLIO_DATA_DIR";

/// Data directory: `FOLIO_DATA_DIR`, else `~/.folio`.
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV).ok(), dirs::home_dir())
}

fn data_dir_from(env_value: Option<String>, home: Option<PathBuf>) -> PathBuf {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home.unwrap_or_else(|| PathBuf::from(".")).join(".folio"),
    }
}

/// Load `{data_dir}/config.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: a warning, then defaults.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "no config.toml found, using defaults");
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(path = %config_path.display(), error = %err, "failed to read config, using defaults");
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %config_path.display(), error = %err, "failed to parse config, using defaults");
            AppConfig::default()
        }
    }
}

/// The LLM API key from the environment, else from `[llm].api_key`.
///
/// `None` means the chat assistant runs without a provider.
pub fn resolve_api_key(settings: &LlmSettings) -> Option<SecretString> {
    resolve_api_key_with(settings, |name| std::env::var(name).ok())
}

fn resolve_api_key_with(
    settings: &LlmSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    let present = |key: &String| !key.trim().is_empty();
    API_KEY_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(present))
        .or_else(|| settings.api_key.clone().filter(present))
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.max_tokens, 2000);
        assert!(config.database.url.is_none());
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 9000

[llm]
model = "openai/gpt-4o-mini"
history_limit = 4
api_key = "sk-from-file"
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.model, "openai/gpt-4o-mini");
        assert_eq!(config.llm.history_limit, 4);
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-from-file"));
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn data_dir_prefers_env() {
        let home = Some(PathBuf::from("/home/ada"));
        assert_eq!(
            data_dir_from(Some("/srv/folio".to_string()), home.clone()),
            PathBuf::from("/srv/folio")
        );
        assert_eq!(data_dir_from(None, home.clone()), PathBuf::from("/home/ada/.folio"));
        assert_eq!(data_dir_from(Some("  ".to_string()), home), PathBuf::from("/home/ada/.folio"));
    }

    #[test]
    fn api_key_priority() {
        let settings = LlmSettings {
            api_key: Some("sk-file".to_string()),
            ..LlmSettings::default()
        };

        let both = |name: &str| match name {
            "FOLIO_LLM_API_KEY" => Some("sk-folio".to_string()),
            "OPENROUTER_API_KEY" => Some("sk-openrouter".to_string()),
            _ => None,
        };
        let key = resolve_api_key_with(&settings, both).unwrap();
        assert_eq!(key.expose_secret(), "sk-folio");

        let openrouter_only = |name: &str| (name == "OPENROUTER_API_KEY").then(|| "sk-openrouter".to_string());
        let key = resolve_api_key_with(&settings, openrouter_only).unwrap();
        assert_eq!(key.expose_secret(), "sk-openrouter");

        let key = resolve_api_key_with(&settings, |_| None).unwrap();
        assert_eq!(key.expose_secret(), "sk-file");
    }

    #[test]
    fn api_key_absent_or_blank() {
        assert!(resolve_api_key_with(&LlmSettings::default(), |_| None).is_none());
        let blank = LlmSettings {
            api_key: Some("   ".to_string()),
            ..LlmSettings::default()
        };
        assert!(resolve_api_key_with(&blank, |_| None).is_none());
    }

    #[test]
    fn blank_env_key_falls_through() {
        let settings = LlmSettings {
            api_key: Some("sk-file".to_string()),
            ..LlmSettings::default()
        };

        let blank_primary = |name: &str| match name {
            "FOLIO_LLM_API_KEY" => Some(String::new()),
            "OPENROUTER_API_KEY" => Some("sk-openrouter".to_string()),
            _ => None,
        };
        let key = resolve_api_key_with(&settings, blank_primary).unwrap();
        assert_eq!(key.expose_secret(), "sk-openrouter");

        let all_blank = |_: &str| Some("  ".to_string());
        let key = resolve_api_key_with(&settings, all_blank).unwrap();
        assert_eq!(key.expose_secret(), "sk-file");
    }
}
