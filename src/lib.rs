// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/

// Declare the modules
pub mod backend;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod registry;
pub mod session;
pub mod state;
pub mod store;

use backend::{InferenceBackend, LlamaCppBackend};
use commands::{
    get_messages, list_models, new_conversation, set_active_model, stop_generation, submit_prompt,
};
use controller::SessionController;
use state::{AppState, TauriEventSink};
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    env_logger::init();

    tauri::Builder::default()
        .setup(|app| {
            let app_handle = app.handle().clone();

            // The controller owns registry, message store and generation
            // session; the frontend only ever talks to it through commands.
            let sink = TauriEventSink::new(app_handle);
            let mut controller = SessionController::new(Box::new(sink));

            // One-shot model bootstrap; there is no live update channel.
            let models = config::bootstrap_models()?;
            controller.register_models(models)?;

            let backend: Arc<dyn InferenceBackend> =
                Arc::new(LlamaCppBackend::new(config::llama_binary_path()));

            // Add the AppState to Tauri's managed state
            app.manage(AppState::new(controller, backend));

            Ok(())
        })
        // Register the command(s) with the handler
        .invoke_handler(tauri::generate_handler![
            list_models,
            set_active_model,
            get_messages,
            submit_prompt,
            stop_generation,
            new_conversation
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
