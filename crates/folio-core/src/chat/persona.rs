//! Persona selection: maps (audience, tone) to the opening of the system prompt.

use folio_types::catalog::SiteConfiguration;
use folio_types::chat::{Audience, Tone};

/// Persona paragraph for a session.
///
/// Layout: `"{base}\n\n{persona}\n\nAudience context: {audience}"`, where the
/// persona text comes from the site configuration. `OwnerVoice` has no text
/// of its own and reuses the professional persona.
pub fn persona_prompt(site: &SiteConfiguration, audience: Audience, tone: Tone) -> String {
    let base = format!(
        "You are an AI assistant for {}, a portfolio website showcasing {}'s work as {}.",
        site.site_name, site.owner_name, site.site_tagline
    );

    let persona = match tone {
        Tone::Technical => &site.chatbot_persona_technical,
        Tone::Casual => &site.chatbot_persona_casual,
        Tone::Professional | Tone::OwnerVoice => &site.chatbot_persona_professional,
    };

    format!(
        "{base}\n\n{persona}\n\nAudience context: {}",
        audience_context(audience, &site.owner_name)
    )
}

fn audience_context(audience: Audience, owner: &str) -> String {
    match audience {
        Audience::Recruiter => "The user is a recruiter or hiring manager. Focus on skills, experience, achievements, and career fit.".to_string(),
        Audience::Developer => "The user is a fellow developer. You can be more technical and discuss architecture, implementation details, and code quality.".to_string(),
        Audience::Founder => "The user is a founder or product person. Focus on business impact, product thinking, and project outcomes.".to_string(),
        Audience::Client => format!(
            "The user is a potential client. Focus on services, deliverables, process, and how {owner} can help solve their problems."
        ),
        Audience::General => format!(
            "The user is a general visitor. Provide helpful information about {owner}'s work and capabilities."
        ),
    }
}
