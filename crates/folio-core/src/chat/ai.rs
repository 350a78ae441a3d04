//! Reply generation: context, prompt, remote completion, sources.
//!
//! The assistant degrades instead of failing when the model is unreachable:
//! a missing API key and a failed remote call both produce canned replies.
//! Only catalog read errors are returned to the caller.

use std::sync::Arc;

use folio_types::catalog::SiteConfiguration;
use folio_types::chat::{Audience, Depth, Source, Tone};
use folio_types::config::LlmSettings;
use folio_types::error::ChatError;
use folio_types::llm::{CompletionRequest, Message, StopReason};
use tracing::{debug, warn};

use super::context::ContextBuilder;
use super::prompt::SystemPromptBuilder;
use super::sources::extract_sources;
use crate::llm::box_provider::BoxLlmProvider;
use crate::repository::portfolio::PortfolioRepository;

pub const UNAVAILABLE_REPLY: &str = "I apologize, but the AI assistant is currently unavailable. Please try contacting directly via email.";
pub const PROVIDER_ERROR_REPLY: &str = "I'm having trouble processing your request. Please try rephrasing your question or contact me directly.";

/// Model name recorded when no provider is configured.
pub const MODEL_NONE: &str = "none";
/// Model name recorded when the remote call failed.
pub const MODEL_ERROR: &str = "error";

/// One generated assistant turn.
#[derive(Debug, Clone)]
pub struct GeneratedReply {
    pub response: String,
    pub sources: Vec<Source>,
    pub tokens_used: u32,
    pub model_used: String,
    /// Why the model stopped; `None` for canned replies.
    pub stop_reason: Option<StopReason>,
}

impl GeneratedReply {
    fn canned(response: &str, model: &str) -> Self {
        Self {
            response: response.to_string(),
            sources: Vec::new(),
            tokens_used: 0,
            model_used: model.to_string(),
            stop_reason: None,
        }
    }
}

/// Personalization and focus for one query.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub query: &'a str,
    pub history: Vec<Message>,
    pub chat_context: &'a serde_json::Value,
    pub audience: Audience,
    pub tone: Tone,
    pub depth: Depth,
}

/// Turns a visitor question into a grounded reply.
pub struct ChatAiService<P: PortfolioRepository> {
    provider: Option<BoxLlmProvider>,
    portfolio: P,
    site: Arc<SiteConfiguration>,
    settings: LlmSettings,
}

impl<P: PortfolioRepository> ChatAiService<P> {
    /// `provider` is `None` when no API credential is configured.
    pub fn new(
        provider: Option<BoxLlmProvider>,
        portfolio: P,
        site: Arc<SiteConfiguration>,
        settings: LlmSettings,
    ) -> Self {
        Self {
            provider,
            portfolio,
            site,
            settings,
        }
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Generate a reply.
    ///
    /// Outgoing messages are the system prompt, then `history`, then the
    /// query as the final user turn.
    pub async fn generate(&self, request: GenerationRequest<'_>) -> Result<GeneratedReply, ChatError> {
        let Some(provider) = &self.provider else {
            debug!("no LLM provider configured, returning unavailable reply");
            return Ok(GeneratedReply::canned(UNAVAILABLE_REPLY, MODEL_NONE));
        };

        let context = ContextBuilder::new(&self.portfolio, &self.site, self.settings.project_limit)
            .build(request.chat_context)
            .await?;
        let system = SystemPromptBuilder::build(
            &self.site,
            request.audience,
            request.tone,
            request.depth,
            &context,
        );

        let mut messages = request.history;
        messages.push(Message::user(request.query));

        let completion = CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: Some(system),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
            presence_penalty: Some(self.settings.presence_penalty),
            frequency_penalty: Some(self.settings.frequency_penalty),
        };

        let response = match provider.complete(&completion).await {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "chat completion failed");
                return Ok(GeneratedReply::canned(PROVIDER_ERROR_REPLY, MODEL_ERROR));
            }
        };

        if response.stop_reason != StopReason::EndTurn {
            warn!(
                stop_reason = %response.stop_reason,
                max_tokens = self.settings.max_tokens,
                "chat completion cut short"
            );
        }

        let sources = extract_sources(&self.portfolio, &response.content).await?;
        debug!(
            tokens = response.usage.total_tokens(),
            sources = sources.len(),
            "chat completion received"
        );

        Ok(GeneratedReply {
            tokens_used: response.usage.total_tokens(),
            response: response.content,
            sources,
            model_used: self.settings.model.clone(),
            stop_reason: Some(response.stop_reason),
        })
    }
}
