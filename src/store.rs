use uuid::Uuid;

use crate::error::SessionError;
use crate::models::{Message, MessageState, Outcome};

/// Shown in place of the response when the backend call fails. The raw
/// failure reason goes to the log only.
pub const FAILED_PLACEHOLDER: &str = "Sorry, an error occurred while generating the response.";

/// Shown when the user stops a generation before the backend finishes.
pub const STOPPED_PLACEHOLDER: &str = "Generation stopped.";

/// The conversation log: ordered, append-only, except for the single
/// in-place pending -> complete/failed transition of an assistant message.
/// Holds raw text only; rendering (code fences, line breaks) is the
/// frontend's job.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message. The prompt must be non-empty after trimming.
    pub fn append_user(&mut self, content: &str) -> Result<&Message, SessionError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Validation("prompt is empty".to_string()));
        }
        self.messages.push(Message::user(trimmed.to_string()));
        Ok(self.messages.last().unwrap())
    }

    /// Reserves an assistant message awaiting a generation result.
    pub fn append_pending_assistant(&mut self) -> &Message {
        self.messages.push(Message::pending_assistant());
        self.messages.last().unwrap()
    }

    /// Transitions a pending message to Complete or Failed, exactly once.
    pub fn resolve(&mut self, id: Uuid, outcome: &Outcome) -> Result<&Message, SessionError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| SessionError::InvalidState(format!("no message with id {}", id)))?;
        if message.state != MessageState::Pending {
            return Err(SessionError::InvalidState(format!(
                "message {} is already resolved",
                id
            )));
        }
        match outcome {
            Outcome::Success { text } => {
                message.state = MessageState::Complete;
                message.content = text.clone();
            }
            Outcome::Failure { reason } => {
                log::warn!("Generation for message {} failed: {}", id, reason);
                message.state = MessageState::Failed;
                message.content = FAILED_PLACEHOLDER.to_string();
            }
        }
        Ok(message)
    }

    /// Empties the log; used when starting a new conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn append_user_trims_and_stores() {
        let mut store = MessageStore::new();
        let message = store.append_user("  hello  ").unwrap();
        assert_eq!(message.content, "hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.state, MessageState::Complete);
    }

    #[test]
    fn append_user_rejects_blank_prompt() {
        let mut store = MessageStore::new();
        let err = store.append_user("   \n").unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn resolve_success_completes_with_text() {
        let mut store = MessageStore::new();
        let id = store.append_pending_assistant().id;
        let outcome = Outcome::Success {
            text: "Hi there".to_string(),
        };
        store.resolve(id, &outcome).unwrap();
        let message = store.get(id).unwrap();
        assert_eq!(message.state, MessageState::Complete);
        assert_eq!(message.content, "Hi there");
    }

    #[test]
    fn resolve_failure_uses_placeholder_not_reason() {
        let mut store = MessageStore::new();
        let id = store.append_pending_assistant().id;
        let outcome = Outcome::Failure {
            reason: "model load failed: /tmp/x.gguf".to_string(),
        };
        store.resolve(id, &outcome).unwrap();
        let message = store.get(id).unwrap();
        assert_eq!(message.state, MessageState::Failed);
        assert_eq!(message.content, FAILED_PLACEHOLDER);
    }

    #[test]
    fn double_resolve_is_invalid_state() {
        let mut store = MessageStore::new();
        let id = store.append_pending_assistant().id;
        let outcome = Outcome::Success {
            text: "first".to_string(),
        };
        store.resolve(id, &outcome).unwrap();
        let err = store.resolve(id, &outcome).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState(_)));
        assert_eq!(store.get(id).unwrap().content, "first");
    }

    #[test]
    fn clear_empties_the_log() {
        let mut store = MessageStore::new();
        store.append_user("hello").unwrap();
        store.append_pending_assistant();
        store.clear();
        assert!(store.is_empty());
    }
}
