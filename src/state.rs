use crate::backend::InferenceBackend;
use crate::controller::{EventSink, SessionController, StatusState};
use crate::models::{Message, ModelInfo};
use std::sync::Arc;
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;

// Core application state accessible by Tauri commands
#[derive(Clone)] // Allow cloning for background tasks
pub struct AppState {
    // The controller owns all conversation state; the single mutex keeps
    // the token-check-then-mutate sequence atomic when a late backend
    // result races a new submission.
    pub controller: Arc<Mutex<SessionController>>,
    pub backend: Arc<dyn InferenceBackend>,
}

impl AppState {
    pub fn new(controller: SessionController, backend: Arc<dyn InferenceBackend>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            backend,
        }
    }
}

// Forwards core notifications to the frontend as Tauri events
pub struct TauriEventSink {
    app_handle: AppHandle,
}

impl TauriEventSink {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }

    fn emit(&self, event: &str, payload: serde_json::Value) {
        if let Err(e) = self.app_handle.emit(event, payload) {
            log::error!("Failed to emit {} event: {:?}", event, e);
        }
    }
}

impl EventSink for TauriEventSink {
    fn status_changed(&self, text: &str, state: StatusState) {
        self.emit(
            "status_changed",
            serde_json::json!({ "text": text, "state": state }),
        );
    }

    fn message_appended(&self, message: &Message) {
        self.emit("message_appended", serde_json::json!(message));
    }

    fn message_resolved(&self, message: &Message) {
        self.emit("message_resolved", serde_json::json!(message));
    }

    fn active_model_changed(&self, model: &ModelInfo) {
        self.emit("active_model_changed", serde_json::json!(model));
    }
}
