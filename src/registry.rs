use crate::error::SessionError;
use crate::models::ModelInfo;

/// Holds the set of models the user can chat with, in display order, plus
/// the currently active selection. Mutated only synchronously from user
/// action or bootstrap, never from background work.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Vec<ModelInfo>,
    active_id: Option<String>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full model list. If nothing is active yet and the new
    /// list is non-empty, the first model becomes active.
    pub fn register(&mut self, models: Vec<ModelInfo>) -> Result<(), SessionError> {
        for (i, model) in models.iter().enumerate() {
            if models[..i].iter().any(|m| m.id == model.id) {
                return Err(SessionError::Validation(format!(
                    "duplicate model id: {}",
                    model.id
                )));
            }
        }
        self.models = models;
        match &self.active_id {
            Some(id) if self.models.iter().any(|m| &m.id == id) => {}
            _ => self.active_id = self.models.first().map(|m| m.id.clone()),
        }
        Ok(())
    }

    pub fn set_active(&mut self, id: &str) -> Result<&ModelInfo, SessionError> {
        let model = self
            .models
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        self.active_id = Some(model.id.clone());
        Ok(model)
    }

    pub fn active(&self) -> Option<&ModelInfo> {
        let id = self.active_id.as_deref()?;
        self.models.iter().find(|m| m.id == id)
    }

    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }
}
