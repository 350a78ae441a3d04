//! Source extraction from assistant replies.
//!
//! The prompt asks the model to cite `/projects/<slug>` and `/gigs/<slug>`
//! links. Every such link that resolves to a catalog record becomes a
//! [`Source`] shown next to the reply.

use std::sync::LazyLock;

use folio_types::chat::{Source, SourceKind};
use folio_types::error::ChatError;
use regex::Regex;

use crate::repository::portfolio::PortfolioRepository;

static PROJECT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/projects/([a-zA-Z0-9-]+)").expect("valid regex"));

static GIG_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/gigs/([a-zA-Z0-9-]+)").expect("valid regex"));

/// Slugs captured by `pattern`, one per match, in mention order.
fn slugs<'t>(pattern: &Regex, text: &'t str) -> Vec<&'t str> {
    pattern
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Resolve the project and gig links mentioned in `reply`.
///
/// Projects come first, then gigs. Project slugs only match public projects;
/// gig slugs match any gig. Unknown slugs are skipped. A link mentioned
/// twice yields two entries.
pub async fn extract_sources<P: PortfolioRepository>(
    portfolio: &P,
    reply: &str,
) -> Result<Vec<Source>, ChatError> {
    let mut sources = Vec::new();

    for slug in slugs(&PROJECT_LINK, reply) {
        if let Some(project) = portfolio.get_public_project(slug).await? {
            sources.push(Source {
                kind: SourceKind::Project,
                url: project.url(),
                title: project.title,
                description: project.short_tagline,
            });
        }
    }

    for slug in slugs(&GIG_LINK, reply) {
        if let Some(gig) = portfolio.get_gig(slug).await? {
            sources.push(Source {
                kind: SourceKind::Gig,
                url: gig.url(),
                title: gig.title,
                description: gig.short_description,
            });
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryPortfolioRepository, gig, project};
    use folio_types::catalog::{GigStatus, Visibility};

    fn catalog() -> InMemoryPortfolioRepository {
        InMemoryPortfolioRepository::new()
            .with_project(project(1, "Realtime Chat", Visibility::Public))
            .with_project(project(2, "Hidden Draft", Visibility::Draft))
            .with_gig(gig(1, "API Development", GigStatus::Paused))
    }

    #[test]
    fn test_slugs_keep_every_match_in_order() {
        let text = "See /projects/b and /projects/a, also /projects/b again.";
        assert_eq!(slugs(&PROJECT_LINK, text), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_slug_stops_at_punctuation() {
        let text = "(See Project: Realtime Chat - /projects/realtime-chat).";
        assert_eq!(slugs(&PROJECT_LINK, text), vec!["realtime-chat"]);
    }

    #[tokio::test]
    async fn test_resolves_projects_then_gigs() {
        let repo = catalog();
        let reply = "Learn more: /gigs/api-development. See Project: Realtime Chat - /projects/realtime-chat";
        let sources = extract_sources(&repo, reply).await.unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].kind, SourceKind::Project);
        assert_eq!(sources[0].title, "Realtime Chat");
        assert_eq!(sources[0].url, "/projects/realtime-chat");
        assert_eq!(sources[0].description, "Realtime Chat tagline");
        assert_eq!(sources[1].kind, SourceKind::Gig);
        assert_eq!(sources[1].description, "API Development short");
    }

    #[tokio::test]
    async fn test_skips_unknown_and_non_public() {
        let repo = catalog();
        let reply = "/projects/hidden-draft /projects/nope /gigs/nope";
        assert!(extract_sources(&repo, reply).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_mentions_each_yield_a_source() {
        let repo = catalog();
        let reply = "/projects/realtime-chat and again /projects/realtime-chat";
        let sources = extract_sources(&repo, reply).await.unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources.iter().all(|s| s.url == "/projects/realtime-chat"));
    }
}
