use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Metadata for a local GGUF model the user can chat with
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelInfo {
    pub id: String,
    pub name: String, // User-friendly name (e.g., "Llama 3 8B")
    pub path: String, // Filesystem path to the .gguf file
    pub size_gb: f64,
}

// Who authored a message
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

// Lifecycle of a single message. Pending exists only for the assistant
// message of an in-flight generation and resolves exactly once.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageState {
    Pending,
    Complete,
    Failed,
}

// A single turn in the conversation
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub state: MessageState,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content,
            state: MessageState::Complete,
            timestamp: Utc::now(),
        }
    }

    pub fn pending_assistant() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: String::new(),
            state: MessageState::Pending,
            timestamp: Utc::now(),
        }
    }
}

/// Correlates an in-flight backend call with the session that dispatched it.
/// Minted fresh per accepted submission; a response carrying a token that no
/// longer matches the session's current one is stale and must be discarded.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken(Uuid);

impl RequestToken {
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Result of a backend generation call, as delivered back to the session
#[derive(Clone, Debug)]
pub enum Outcome {
    Success { text: String },
    // The reason is for logs only; the user sees a fixed placeholder so
    // backend internals never leak into the conversation.
    Failure { reason: String },
}
