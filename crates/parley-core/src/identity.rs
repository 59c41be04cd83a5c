//! Identifiers passed between the compose screen and its collaborators
//!
//! - [`UserId`]: a registered user of the service
//! - [`ThreadId`]: a conversation's message stream
//! - [`ContactRef`]: an opaque device contact returned by the picker

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Stable identifier of a registered contact within the service
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a conversation thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub i64);

impl ThreadId {
    /// Create a thread id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque contact reference handed back by the contact picker
///
/// Only the [`ContactDirectory`](crate::ContactDirectory) knows how to
/// interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactRef(String);

impl ContactRef {
    /// Create a contact reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContactRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        let user = UserId::new("u1");
        assert_eq!(user.as_str(), "u1");
        assert_eq!(format!("{}", user), "u1");
        assert_eq!(UserId::from("u1"), user);
    }

    #[test]
    fn test_thread_id_serializes_as_number() {
        let json = serde_json::to_string(&ThreadId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: ThreadId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(), 42);
    }
}
