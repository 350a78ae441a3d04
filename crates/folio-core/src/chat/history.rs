//! Conversation history replayed to the model.

use folio_types::error::ChatError;
use folio_types::llm::Message;
use uuid::Uuid;

use super::repository::ChatRepository;

/// Load the last `limit` messages of a session as chronological
/// user/assistant turns.
///
/// Called before the current query is persisted, so the query itself is not
/// part of the returned history.
pub async fn load_history<C: ChatRepository>(
    chat_repo: &C,
    session_id: &Uuid,
    limit: u32,
) -> Result<Vec<Message>, ChatError> {
    let mut recent = chat_repo.recent_messages(session_id, limit).await?;
    recent.reverse();

    Ok(recent
        .into_iter()
        .map(|m| Message {
            role: m.role(),
            content: m.content,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryChatRepository;
    use folio_types::chat::{Audience, ChatMessage, ChatSession, Tone};
    use folio_types::llm::MessageRole;

    async fn session_with_turns(repo: &InMemoryChatRepository, turns: usize) -> Uuid {
        let session = ChatSession::new(None, "key".to_string(), Audience::General, Tone::Professional);
        repo.create_session(&session).await.unwrap();
        for i in 0..turns {
            repo.save_message(&ChatMessage::from_user(session.id, format!("question {i}")))
                .await
                .unwrap();
            let mut answer = ChatMessage::from_user(session.id, format!("answer {i}"));
            answer.is_from_user = false;
            repo.save_message(&answer).await.unwrap();
        }
        session.id
    }

    #[tokio::test]
    async fn test_history_is_chronological_and_bounded() {
        let repo = InMemoryChatRepository::new();
        let session_id = session_with_turns(&repo, 8).await;

        let history = load_history(&repo, &session_id, 10).await.unwrap();
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].content, "question 3");
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[9].content, "answer 7");
        assert_eq!(history[9].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_empty_session_has_no_history() {
        let repo = InMemoryChatRepository::new();
        let session_id = session_with_turns(&repo, 0).await;
        assert!(load_history(&repo, &session_id, 10).await.unwrap().is_empty());
    }
}
