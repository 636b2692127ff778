use crate::models::{Message, ModelInfo, Outcome};
use crate::state::AppState;
use tauri::State;

// Tauri command to list the registered models
#[tauri::command]
pub async fn list_models(state: State<'_, AppState>) -> Result<Vec<ModelInfo>, String> {
    log::info!("Frontend requested to list models");
    let controller = state.controller.lock().await;
    Ok(controller.models().to_vec())
}

// Tauri command to switch the active model
#[tauri::command]
pub async fn set_active_model(
    state: State<'_, AppState>,
    model_id: String,
) -> Result<ModelInfo, String> {
    log::info!("Frontend requested to activate model ID: {}", model_id);
    let mut controller = state.controller.lock().await;
    controller.set_active_model(&model_id).map_err(|e| {
        log::error!("Failed to activate model {}: {}", model_id, e);
        e.to_string()
    })
}

// Tauri command to fetch the current conversation thread
#[tauri::command]
pub async fn get_messages(state: State<'_, AppState>) -> Result<Vec<Message>, String> {
    let controller = state.controller.lock().await;
    Ok(controller.messages().to_vec())
}

// Tauri command to submit a prompt. The gate runs under the lock; on
// acceptance the backend call happens in a background task and its result
// is delivered back through the controller with the dispatch token.
#[tauri::command]
pub async fn submit_prompt(state: State<'_, AppState>, prompt: String) -> Result<(), String> {
    log::info!("Frontend submitted a prompt ({} chars)", prompt.len());

    let dispatch = {
        let mut controller = state.controller.lock().await;
        controller.submit(&prompt).map_err(|e| {
            log::warn!("Submission rejected: {}", e);
            e.to_string()
        })?
        // Lock released here so the UI stays responsive during generation
    };

    let app_state = state.inner().clone();
    tauri::async_runtime::spawn(async move {
        log::info!("Background generation task started, token {}", dispatch.token);
        let outcome = match app_state
            .backend
            .generate(&dispatch.prompt, &dispatch.model)
            .await
        {
            Ok(text) => Outcome::Success { text },
            Err(e) => {
                log::error!("BG Task [{}]: generation failed: {:?}", dispatch.token, e);
                Outcome::Failure {
                    reason: e.to_string(),
                }
            }
        };

        // Re-acquire the lock only to deliver the result; the controller
        // decides whether this token is still authoritative.
        let mut controller = app_state.controller.lock().await;
        if let Err(e) = controller.backend_resolved(dispatch.token, outcome) {
            log::error!("BG Task [{}]: failed to deliver result: {}", dispatch.token, e);
        }
    });

    Ok(())
}

// Tauri command to stop the in-flight generation. The subprocess is not
// killed; its eventual result is discarded as stale.
#[tauri::command]
pub async fn stop_generation(state: State<'_, AppState>) -> Result<(), String> {
    log::warn!("Frontend requested to stop generation");
    let mut controller = state.controller.lock().await;
    controller.stop().map_err(|e| {
        log::error!("Failed to stop generation: {}", e);
        e.to_string()
    })
}

// Tauri command to start a fresh conversation
#[tauri::command]
pub async fn new_conversation(state: State<'_, AppState>) -> Result<(), String> {
    log::info!("Frontend requested a new conversation");
    let mut controller = state.controller.lock().await;
    controller.new_conversation();
    Ok(())
}
