//! Persisted screen state
//!
//! Only one fact survives process death: which conversation was open.

use parley_core::{ComposeResult, ConversationUri, ThreadId};
use serde::{Deserialize, Serialize};

use crate::config::ComposeConfig;

/// State saved when the screen may be destroyed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Reference of the conversation that was open
    pub conversation: ConversationUri,
}

impl SavedState {
    pub fn new(conversation: ConversationUri) -> Self {
        Self { conversation }
    }

    /// Saved state for a thread under the configured conversation base
    pub fn for_thread(config: &ComposeConfig, thread_id: ThreadId) -> Self {
        Self::new(ConversationUri::for_thread(
            &config.conversations_base,
            thread_id,
        ))
    }

    /// Encode as a JSON bundle
    pub fn to_json(&self) -> ComposeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from a JSON bundle
    ///
    /// The saved reference must end in a thread id.
    pub fn from_json(json: &str) -> ComposeResult<Self> {
        let saved: Self = serde_json::from_str(json)?;
        ConversationUri::parse(saved.conversation.as_str())?;
        Ok(saved)
    }
}
