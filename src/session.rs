use uuid::Uuid;

use crate::error::SessionError;
use crate::models::RequestToken;

/// Record of the single allowed in-flight generation: the token that makes
/// its backend call authoritative, and the id of the pending assistant
/// message it will resolve. The message itself is owned by the store; the
/// session only keeps the id, so clearing the conversation cannot dangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub token: RequestToken,
    pub target: Uuid,
}

/// Generation lifecycle for one conversation. Either idle, or generating
/// with exactly one in-flight request; there is no queue. Holding the token
/// and target inside the Generating variant keeps the "generating iff token
/// iff target" invariant structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationSession {
    #[default]
    Idle,
    Generating(InFlight),
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating(_))
    }

    /// Accepts a submission: mints a fresh token and records the pending
    /// message it will resolve. Rejects with `Busy` while a request is in
    /// flight; the caller must not have appended anything yet.
    pub fn begin(&mut self, target: Uuid) -> Result<RequestToken, SessionError> {
        if self.is_generating() {
            return Err(SessionError::Busy);
        }
        let token = RequestToken::mint();
        *self = Self::Generating(InFlight { token, target });
        Ok(token)
    }

    /// Reconciles a backend response. Returns the target message id when the
    /// token is still authoritative, transitioning back to idle. A stale
    /// token (the session moved on via stop or reset) yields `None` and
    /// leaves the session untouched.
    pub fn reconcile(&mut self, token: RequestToken) -> Option<Uuid> {
        match *self {
            Self::Generating(in_flight) if in_flight.token == token => {
                *self = Self::Idle;
                Some(in_flight.target)
            }
            _ => None,
        }
    }

    /// Revokes authority over the pending result and returns its message id.
    /// The backend call itself is not aborted; when it eventually resolves,
    /// its token no longer matches and `reconcile` discards it.
    pub fn stop(&mut self) -> Option<Uuid> {
        match *self {
            Self::Generating(in_flight) => {
                *self = Self::Idle;
                Some(in_flight.target)
            }
            Self::Idle => None,
        }
    }
}
