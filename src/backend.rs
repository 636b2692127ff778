use crate::models::ModelInfo;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

// Trait defining the interface to the local inference backend.
// The call is atomic: fire, then a single return. Any failure is opaque to
// callers and ends up as a failed message resolution, never a fault.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(&self, prompt: &str, model: &ModelInfo) -> Result<String>;
}

// --- llama.cpp Subprocess Backend ---

/// Runs the `llama-cli` binary as a child process per request, reading the
/// generated text from its stdout. There is no cancellation channel: once
/// spawned, the process runs to completion on its own.
pub struct LlamaCppBackend {
    binary: PathBuf,
}

impl LlamaCppBackend {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl InferenceBackend for LlamaCppBackend {
    async fn generate(&self, prompt: &str, model: &ModelInfo) -> Result<String> {
        log::info!(
            "Spawning {} with model {} ({})",
            self.binary.display(),
            model.name,
            model.path
        );

        let mut child = Command::new(&self.binary)
            .args(["-m", &model.path, "-p", prompt])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .context("Failed to spawn llama-cli process")?;

        let stdout = child
            .stdout
            .take()
            .context("Failed to capture llama-cli stdout")?;
        let reader = BufReader::new(stdout);
        let mut lines = reader.lines();

        let mut output = String::new();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read llama-cli output")?
        {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&line);
        }

        let status = child
            .wait()
            .await
            .context("Failed to wait for llama-cli process")?;
        if !status.success() {
            return Err(anyhow::anyhow!("llama-cli exited with {}", status));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(path: &str) -> ModelInfo {
        ModelInfo {
            id: "1".to_string(),
            name: "Llama 3 8B".to_string(),
            path: path.to_string(),
            size_gb: 4.7,
        }
    }

    #[tokio::test]
    async fn missing_binary_is_an_opaque_error() {
        let backend = LlamaCppBackend::new(PathBuf::from("/nonexistent/llama-cli"));
        let err = backend
            .generate("hello", &model("/tmp/llama3-8b.gguf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to spawn"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_of_the_child_process() {
        // /bin/echo stands in for llama-cli: prints its args and exits zero.
        let backend = LlamaCppBackend::new(PathBuf::from("/bin/echo"));
        let output = backend
            .generate("hello", &model("fake.gguf"))
            .await
            .unwrap();
        assert_eq!(output, "-m fake.gguf -p hello");
    }
}
