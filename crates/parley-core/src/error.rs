//! Error types for the compose screen

use thiserror::Error;

use crate::identity::ContactRef;

/// Errors raised while resolving an activation request
///
/// None of these escape the screen controller: each one resolves to either a
/// user-visible notice followed by termination, or a silent inert state.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Picked contact has no registered user id
    #[error("contact not registered: {0}")]
    ContactNotRegistered(ContactRef),

    /// Share payload matches no supported message kind
    #[error("unsupported share kind: {0}")]
    UnsupportedShareKind(String),

    /// Contact picker returned without a selection
    #[error("contact pick cancelled")]
    PickCancelled,

    /// Activation action matched no known flow
    #[error("unrecognized activation action: {0}")]
    UnrecognizedAction(String),

    /// A conversation or content reference could not be parsed
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Contact directory lookup failed
    #[error("contact directory error: {0}")]
    Directory(String),

    /// Conversation store lookup failed
    #[error("conversation store error: {0}")]
    Store(String),

    /// Saved state could not be encoded or decoded
    #[error("saved state error: {0}")]
    SavedState(String),

    /// Screen configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ComposeError {
    fn from(e: serde_json::Error) -> Self {
        ComposeError::SavedState(e.to_string())
    }
}

impl ComposeError {
    /// Whether this error should be shown to the user before the screen ends
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            ComposeError::ContactNotRegistered(_)
                | ComposeError::Directory(_)
                | ComposeError::Store(_)
        )
    }
}

/// Result type for compose operations
pub type ComposeResult<T> = Result<T, ComposeError>;
