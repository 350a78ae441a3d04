//! System prompt assembler for the portfolio assistant.
//!
//! The prompt is a fixed template: persona, depth instruction, citation
//! rules, the serialized portfolio context, an example answer and a closing
//! reminder. The only length control is the `max_tokens` cap on the request.

use folio_types::catalog::SiteConfiguration;
use folio_types::chat::{Audience, Depth, Tone};

use super::context::PortfolioContext;
use super::persona::persona_prompt;

/// Builds the system prompt for one chat query.
///
/// Layout:
/// ```text
/// {persona}
///
/// {depth instruction}
///
/// CRITICAL REQUIREMENTS:
/// 1. ... 5.
///
/// Portfolio Data:
/// {context as pretty JSON}
///
/// Example response format:
/// "..."
///
/// Remember: ...
/// ```
pub struct SystemPromptBuilder;

impl SystemPromptBuilder {
    pub fn build(
        site: &SiteConfiguration,
        audience: Audience,
        tone: Tone,
        depth: Depth,
        context: &PortfolioContext,
    ) -> String {
        let persona = persona_prompt(site, audience, tone);
        // Serializing plain structs with string keys cannot fail.
        let context_json = serde_json::to_string_pretty(context).unwrap_or_default();
        let owner = &site.owner_name;

        format!(
            "{persona}\n\n\
            {depth}\n\n\
            CRITICAL REQUIREMENTS:\n\
            1. You must ALWAYS cite sources when making factual claims about projects, skills, or achievements\n\
            2. When mentioning a project, include a link like: \"See Project: [Title] - /projects/[slug]\"\n\
            3. When mentioning a service, include a link like: \"Learn more: /gigs/[slug]\"\n\
            4. If you don't have information in the portfolio data, say so honestly and offer to connect them directly\n\
            5. Never invent project details, metrics, or capabilities not present in the provided data\n\n\
            Portfolio Data:\n\
            {context_json}\n\n\
            Example response format:\n\
            \"Based on the portfolio, {owner} has extensive experience with React and Django, as demonstrated in the Realtime Chat App project (See Project: Realtime Chat App - /projects/realtime-chat). This project achieved 99.9% uptime and served over 10,000 users.\"\n\n\
            Remember: Always be helpful, accurate, and cite your sources with internal links!",
            depth = depth_instruction(depth),
        )
    }
}

fn depth_instruction(depth: Depth) -> &'static str {
    match depth {
        Depth::Short => "Keep responses concise and to the point (1-2 sentences for simple questions, 1-2 paragraphs for complex ones).",
        Depth::Medium => "Provide balanced responses with good detail (2-3 paragraphs typically).",
        Depth::Long => "Provide comprehensive, detailed responses with examples and context.",
    }
}
