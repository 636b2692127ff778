use crate::models::ModelInfo;
use anyhow::{Context, Result};
use std::path::PathBuf;

// --- Backend binary discovery ---

const LLAMA_BIN_ENV: &str = "MODELCHAT_LLAMA_BIN";

/// Locates the `llama-cli` binary: the `MODELCHAT_LLAMA_BIN` environment
/// variable wins, otherwise the llama.cpp build tree next to the repo.
pub fn llama_binary_path() -> PathBuf {
    if let Ok(path) = std::env::var(LLAMA_BIN_ENV) {
        log::debug!("Using llama-cli from {}: {}", LLAMA_BIN_ENV, path);
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../llama.cpp/build/bin/llama-cli")
}

// --- Model list bootstrap ---

const MODELS_FILE_ENV: &str = "MODELCHAT_MODELS_FILE";

/// One-shot bootstrap of the model list at startup. Reads a JSON file when
/// `MODELCHAT_MODELS_FILE` is set, otherwise falls back to the built-in
/// default entry. There is no live update channel; the list is fixed for
/// the lifetime of the process.
pub fn bootstrap_models() -> Result<Vec<ModelInfo>> {
    if let Ok(path) = std::env::var(MODELS_FILE_ENV) {
        log::info!("Loading model list from {}", path);
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read model list file '{}'", path))?;
        return parse_models(&raw);
    }
    Ok(default_models())
}

fn parse_models(raw: &str) -> Result<Vec<ModelInfo>> {
    serde_json::from_str(raw).context("Failed to parse model list JSON")
}

fn default_models() -> Vec<ModelInfo> {
    vec![ModelInfo {
        id: "1".to_string(),
        name: "Llama 3 8B".to_string(),
        path: "../models/llama3-8b.gguf".to_string(),
        size_gb: 4.7,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_has_one_model() {
        let models = default_models();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Llama 3 8B");
    }

    #[test]
    fn parses_model_list_json() {
        let raw = r#"[
            {"id": "1", "name": "Llama 3 8B", "path": "../models/llama3-8b.gguf", "size_gb": 4.7},
            {"id": "2", "name": "Mistral 7B", "path": "../models/mistral-7b.gguf", "size_gb": 4.1}
        ]"#;
        let models = parse_models(raw).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[1].id, "2");
    }

    #[test]
    fn rejects_malformed_model_list() {
        assert!(parse_models("not json").is_err());
    }
}
