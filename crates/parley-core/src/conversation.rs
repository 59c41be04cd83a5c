//! Conversation records as returned by the conversation store

use serde::{Deserialize, Serialize};

use crate::identity::{ThreadId, UserId};
use crate::uri::ConversationUri;

/// An existing conversation with a single participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Thread the conversation's messages belong to
    pub thread_id: ThreadId,
    /// The other participant
    pub participant: UserId,
}

impl Conversation {
    pub fn new(thread_id: ThreadId, participant: UserId) -> Self {
        Self {
            thread_id,
            participant,
        }
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Reference to this conversation under the given collection base
    pub fn uri(&self, base: &str) -> ConversationUri {
        ConversationUri::for_thread(base, self.thread_id)
    }
}
