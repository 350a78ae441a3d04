//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI commands
//! and REST handlers. Services are generic over repository traits; AppState
//! pins them to the SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use folio_core::chat::ai::ChatAiService;
use folio_core::chat::service::ChatService;
use folio_core::llm::box_provider::BoxLlmProvider;
use folio_core::service::account::AccountService;
use folio_core::service::analytics::AnalyticsService;
use folio_core::service::cleanup::DataCleanupService;
use folio_core::service::hire::HireService;
use folio_core::service::portfolio::PortfolioService;
use folio_infra::config::{load_app_config, resolve_api_key, resolve_data_dir};
use folio_infra::crypto::token::Sha256TokenIssuer;
use folio_infra::llm::openai_compat::{OpenAiCompatConfig, OpenAiCompatibleProvider};
use folio_infra::sqlite::account::SqliteAccountRepository;
use folio_infra::sqlite::analytics::SqliteAnalyticsRepository;
use folio_infra::sqlite::chat::SqliteChatRepository;
use folio_infra::sqlite::hire::SqliteHireRequestRepository;
use folio_infra::sqlite::pool::{DatabasePool, database_url_for};
use folio_infra::sqlite::portfolio::SqlitePortfolioRepository;
use folio_types::config::{AppConfig, LlmSettings};
use tracing::{info, warn};

pub type ConcreteChatService =
    ChatService<SqliteChatRepository, SqlitePortfolioRepository, SqliteAnalyticsRepository>;

pub type ConcretePortfolioService = PortfolioService<SqlitePortfolioRepository>;

pub type ConcreteAccountService = AccountService<SqliteAccountRepository, Sha256TokenIssuer>;

pub type ConcreteAnalyticsService = AnalyticsService<SqliteAnalyticsRepository>;

pub type ConcreteHireService =
    HireService<SqlitePortfolioRepository, SqliteHireRequestRepository, SqliteAnalyticsRepository>;

pub type ConcreteCleanupService = DataCleanupService<SqliteChatRepository, SqliteAnalyticsRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub portfolio_service: Arc<ConcretePortfolioService>,
    pub account_service: Arc<ConcreteAccountService>,
    pub analytics_service: Arc<ConcreteAnalyticsService>,
    pub hire_service: Arc<ConcreteHireService>,
    pub cleanup_service: Arc<ConcreteCleanupService>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Resolve the data directory, read `config.toml`, open the database and
    /// wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;
        let db_url = config
            .database
            .url
            .clone()
            .unwrap_or_else(|| database_url_for(&data_dir));
        let db_pool = DatabasePool::new(&db_url).await?;

        let provider = build_provider(&config.llm);
        Self::assemble(data_dir, config, db_pool, provider).await
    }

    /// Wire services over an open pool.
    ///
    /// The site configuration is read once here and shared with the chat
    /// pipeline for the lifetime of the process.
    pub async fn assemble(
        data_dir: PathBuf,
        config: AppConfig,
        db_pool: DatabasePool,
        provider: Option<BoxLlmProvider>,
    ) -> anyhow::Result<Self> {
        let chat_repo = SqliteChatRepository::new(db_pool.clone());
        let portfolio_repo = SqlitePortfolioRepository::new(db_pool.clone());
        let analytics_repo = SqliteAnalyticsRepository::new(db_pool.clone());

        let portfolio_service = PortfolioService::new(portfolio_repo.clone());
        let site = Arc::new(portfolio_service.site_configuration().await?);

        let hire_service = HireService::new(
            portfolio_repo.clone(),
            SqliteHireRequestRepository::new(db_pool.clone()),
            analytics_repo.clone(),
        );

        let ai = ChatAiService::new(provider, portfolio_repo, site, config.llm.clone());
        let chat_service = ChatService::new(chat_repo.clone(), ai, analytics_repo.clone());

        let account_service = AccountService::new(
            SqliteAccountRepository::new(db_pool.clone()),
            Sha256TokenIssuer::new(),
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            portfolio_service: Arc::new(portfolio_service),
            account_service: Arc::new(account_service),
            analytics_service: Arc::new(AnalyticsService::new(analytics_repo.clone())),
            hire_service: Arc::new(hire_service),
            cleanup_service: Arc::new(DataCleanupService::new(chat_repo, analytics_repo)),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}

/// OpenAI-compatible provider when an API key is configured, else `None`.
fn build_provider(settings: &LlmSettings) -> Option<BoxLlmProvider> {
    let Some(api_key) = resolve_api_key(settings) else {
        warn!("no LLM API key configured, chat replies will be unavailable");
        return None;
    };
    let config = OpenAiCompatConfig::from_settings(settings, api_key);
    info!(provider = %config.provider_name, model = %config.model, "LLM provider configured");
    Some(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// State over a fresh migrated database in a temp directory.
    pub async fn test_state(provider: Option<BoxLlmProvider>) -> AppState {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        let data_dir = dir.path().to_path_buf();
        std::mem::forget(dir);
        AppState::assemble(data_dir, AppConfig::default(), pool, provider)
            .await
            .unwrap()
    }
}
