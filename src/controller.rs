use serde::Serialize;

use crate::error::SessionError;
use crate::models::{Message, ModelInfo, Outcome, RequestToken};
use crate::registry::ModelRegistry;
use crate::session::GenerationSession;
use crate::store::{MessageStore, STOPPED_PLACEHOLDER};

// Status indicator state mirrored by the frontend status bar
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Ready,
    Loading,
}

/// Notifications the core emits for the presentation layer, one per
/// completed transition. The production sink forwards them as Tauri events.
pub trait EventSink: Send + Sync {
    fn status_changed(&self, text: &str, state: StatusState);
    fn message_appended(&self, message: &Message);
    fn message_resolved(&self, message: &Message);
    fn active_model_changed(&self, model: &ModelInfo);
}

/// An accepted submission, handed to the command layer for dispatch to the
/// inference backend. The token must accompany the eventual response so the
/// controller can tell an authoritative result from a stale one.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub token: RequestToken,
    pub prompt: String,
    pub model: ModelInfo,
}

/// Orchestrates registry, message store and generation session in response
/// to user intents. Holds no state beyond the wiring; it is the only surface
/// the command layer talks to, and rejections never mutate the stores.
pub struct SessionController {
    registry: ModelRegistry,
    store: MessageStore,
    session: GenerationSession,
    events: Box<dyn EventSink>,
}

impl SessionController {
    pub fn new(events: Box<dyn EventSink>) -> Self {
        Self {
            registry: ModelRegistry::new(),
            store: MessageStore::new(),
            session: GenerationSession::new(),
            events,
        }
    }

    /// One-shot bootstrap of the model list.
    pub fn register_models(&mut self, models: Vec<ModelInfo>) -> Result<(), SessionError> {
        self.registry.register(models)?;
        if let Some(model) = self.registry.active() {
            let model = model.clone();
            self.events.active_model_changed(&model);
        }
        self.emit_ready_status();
        Ok(())
    }

    pub fn set_active_model(&mut self, id: &str) -> Result<ModelInfo, SessionError> {
        let model = self.registry.set_active(id)?.clone();
        self.events.active_model_changed(&model);
        self.emit_ready_status();
        Ok(model)
    }

    /// Gate and dispatch for a prompt submission. On acceptance the user
    /// message and a pending assistant message are appended, a fresh token
    /// is minted and the caller receives everything it needs to invoke the
    /// backend. On rejection nothing is appended.
    pub fn submit(&mut self, prompt: &str) -> Result<Dispatch, SessionError> {
        if self.session.is_generating() {
            return Err(SessionError::Busy);
        }
        if prompt.trim().is_empty() {
            return Err(SessionError::Validation("prompt is empty".to_string()));
        }
        let model = self
            .registry
            .active()
            .cloned()
            .ok_or_else(|| SessionError::Validation("no active model".to_string()))?;

        let user = self.store.append_user(prompt)?.clone();
        self.events.message_appended(&user);
        let pending = self.store.append_pending_assistant().clone();
        self.events.message_appended(&pending);

        let token = self.session.begin(pending.id)?;
        self.events.status_changed("Generating...", StatusState::Loading);

        log::info!(
            "Accepted submission, token {} targeting message {}",
            token,
            pending.id
        );
        Ok(Dispatch {
            token,
            prompt: user.content,
            model,
        })
    }

    /// Delivers a backend response. Only a response carrying the current
    /// token resolves the pending message; anything else is stale and is
    /// discarded without touching session or store.
    pub fn backend_resolved(
        &mut self,
        token: RequestToken,
        outcome: Outcome,
    ) -> Result<(), SessionError> {
        let Some(target) = self.session.reconcile(token) else {
            log::debug!("Discarding stale backend response for token {}", token);
            return Ok(());
        };
        let message = self.store.resolve(target, &outcome)?.clone();
        self.events.message_resolved(&message);
        self.emit_ready_status();
        Ok(())
    }

    /// Revokes the in-flight request, if any. The pending message is
    /// resolved to a neutral placeholder right away so the thread never
    /// shows an empty bubble; the backend call keeps running and its late
    /// result is discarded as stale. No-op while idle.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        let Some(target) = self.session.stop() else {
            return Ok(());
        };
        let outcome = Outcome::Success {
            text: STOPPED_PLACEHOLDER.to_string(),
        };
        let message = self.store.resolve(target, &outcome)?.clone();
        self.events.message_resolved(&message);
        self.emit_ready_status();
        log::info!("Generation stopped by user");
        Ok(())
    }

    /// Clears the conversation. A generation still in flight is implicitly
    /// stopped first: the session drops its token, so the late result
    /// cannot resurface in the fresh thread.
    pub fn new_conversation(&mut self) {
        if self.session.stop().is_some() {
            log::info!("New conversation started while generating; in-flight request abandoned");
        }
        self.store.clear();
        self.emit_ready_status();
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn models(&self) -> &[ModelInfo] {
        self.registry.models()
    }

    pub fn active_model(&self) -> Option<&ModelInfo> {
        self.registry.active()
    }

    pub fn is_generating(&self) -> bool {
        self.session.is_generating()
    }

    fn emit_ready_status(&self) {
        let text = self
            .registry
            .active()
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "Ready".to_string());
        self.events.status_changed(&text, StatusState::Ready);
    }
}
