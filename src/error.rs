use thiserror::Error;

/// Errors surfaced by the session core. Backend failures are not part of this
/// taxonomy: they are always converted into a Failed message resolution at
/// the session boundary and never propagate as faults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    // Caller supplied invalid input; nothing was mutated.
    #[error("invalid input: {0}")]
    Validation(String),

    // Reference to a model id that is not registered.
    #[error("model not found: {0}")]
    NotFound(String),

    // Protocol violation (e.g. resolving an already-resolved message).
    // Unreachable through correct controller wiring.
    #[error("invalid state: {0}")]
    InvalidState(String),

    // A generation is already in flight; the submission was rejected, not queued.
    #[error("a generation is already in progress")]
    Busy,
}
