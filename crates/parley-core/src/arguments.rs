//! Arguments handed to the presentation layer
//!
//! [`NormalizedArguments`] is the single shape every activation path reduces
//! to. The constructors pair each action with the only kind of data it may
//! carry, so a conversation view can never hold a user id and vice versa.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::uri::ConversationUri;

/// Action that produced a set of arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewAction {
    /// Generic deep-link view of a conversation
    ViewGeneric,
    /// View an existing conversation thread
    ViewConversation,
    /// Compose to a user that may not have a thread yet
    ViewByUserId,
}

impl Display for ViewAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewAction::ViewGeneric => write!(f, "view"),
            ViewAction::ViewConversation => write!(f, "view_conversation"),
            ViewAction::ViewByUserId => write!(f, "view_user_id"),
        }
    }
}

/// Target of a set of arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgumentData {
    Conversation(ConversationUri),
    User(UserId),
}

/// Canonical arguments forwarded to the presentation surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedArguments {
    action: ViewAction,
    data: ArgumentData,
}

impl NormalizedArguments {
    /// Arguments for a generic view request
    pub fn view(uri: ConversationUri) -> Self {
        Self {
            action: ViewAction::ViewGeneric,
            data: ArgumentData::Conversation(uri),
        }
    }

    /// Arguments for viewing an existing conversation
    pub fn view_conversation(uri: ConversationUri) -> Self {
        Self {
            action: ViewAction::ViewConversation,
            data: ArgumentData::Conversation(uri),
        }
    }

    /// Arguments for composing to a user with no known thread
    pub fn view_user(user_id: UserId) -> Self {
        Self {
            action: ViewAction::ViewByUserId,
            data: ArgumentData::User(user_id),
        }
    }

    pub fn action(&self) -> ViewAction {
        self.action
    }

    pub fn data(&self) -> &ArgumentData {
        &self.data
    }

    /// Conversation reference, when the arguments target a conversation
    pub fn conversation_uri(&self) -> Option<&ConversationUri> {
        match &self.data {
            ArgumentData::Conversation(uri) => Some(uri),
            ArgumentData::User(_) => None,
        }
    }

    /// User id, when the arguments target a user
    pub fn user_id(&self) -> Option<&UserId> {
        match &self.data {
            ArgumentData::User(user) => Some(user),
            ArgumentData::Conversation(_) => None,
        }
    }
}

impl Display for NormalizedArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.data {
            ArgumentData::Conversation(uri) => write!(f, "{} {}", self.action, uri),
            ArgumentData::User(user) => write!(f, "{} {}", self.action, user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_target() {
        let uri = ConversationUri::new("content://x/conversations/1");
        let args = NormalizedArguments::view_conversation(uri.clone());
        assert_eq!(args.action(), ViewAction::ViewConversation);
        assert_eq!(args.conversation_uri(), Some(&uri));
        assert!(args.user_id().is_none());

        let args = NormalizedArguments::view_user(UserId::new("u1"));
        assert_eq!(args.action(), ViewAction::ViewByUserId);
        assert_eq!(args.user_id().map(UserId::as_str), Some("u1"));
        assert!(args.conversation_uri().is_none());
    }

    #[test]
    fn test_generic_view_keeps_its_action() {
        let uri = ConversationUri::new("content://x/conversations/1");
        let generic = NormalizedArguments::view(uri.clone());
        assert_eq!(generic.action(), ViewAction::ViewGeneric);
        assert_ne!(generic, NormalizedArguments::view_conversation(uri));
    }

    #[test]
    fn test_display() {
        let args = NormalizedArguments::view_user(UserId::new("u1"));
        assert_eq!(format!("{}", args), "view_user_id u1");
    }
}
