//! Content references
//!
//! A conversation reference is the conversation collection base followed by
//! `/` and the thread id. The composition rule is preserved verbatim across
//! save and restore, so a restored reference compares equal to the original.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, ComposeResult};
use crate::identity::ThreadId;

/// Default base reference of the conversation collection
pub const DEFAULT_CONVERSATIONS_BASE: &str = "content://parley.messages/conversations";

/// Default base reference of the threads-by-user collection
pub const DEFAULT_THREADS_BASE: &str = "content://parley.messages/threads";

/// Reference to a single conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationUri(String);

impl ConversationUri {
    /// Wrap an existing reference without validating it
    ///
    /// Deep links arrive in whatever shape the sender chose; the
    /// presentation layer decides what to do with references it cannot load.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Build the reference for a thread under the given collection base
    pub fn for_thread(base: &str, thread_id: ThreadId) -> Self {
        Self(format!("{}/{}", base.trim_end_matches('/'), thread_id))
    }

    /// Parse a reference and require a numeric trailing thread id
    pub fn parse(uri: &str) -> ComposeResult<Self> {
        let parsed = Self::new(uri);
        if parsed.thread_id().is_none() {
            return Err(ComposeError::InvalidReference(uri.to_string()));
        }
        Ok(parsed)
    }

    /// Thread id encoded in the trailing path segment, if any
    pub fn thread_id(&self) -> Option<ThreadId> {
        self.0
            .rsplit_once('/')
            .and_then(|(_, last)| last.parse::<i64>().ok())
            .map(ThreadId::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ConversationUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to externally shared binary content (an image stream)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentUri(String);

impl ContentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_thread() {
        let uri = ConversationUri::for_thread(DEFAULT_CONVERSATIONS_BASE, ThreadId::new(42));
        assert_eq!(uri.as_str(), "content://parley.messages/conversations/42");
        assert_eq!(uri.thread_id(), Some(ThreadId::new(42)));
    }

    #[test]
    fn test_for_thread_trailing_slash() {
        let uri = ConversationUri::for_thread("content://x/conversations/", ThreadId::new(7));
        assert_eq!(uri.as_str(), "content://x/conversations/7");
    }

    #[test]
    fn test_parse() {
        assert!(ConversationUri::parse("content://x/conversations/7").is_ok());

        let err = ConversationUri::parse("content://x/conversations/abc").unwrap_err();
        assert!(matches!(err, ComposeError::InvalidReference(_)));
        assert!(ConversationUri::parse("nothing").is_err());
    }

    #[test]
    fn test_thread_id_missing() {
        assert_eq!(ConversationUri::new("content://x/threads/u1").thread_id(), None);
    }
}
