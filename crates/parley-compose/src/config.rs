//! Configuration for the compose screen

use parley_core::{ComposeError, ComposeResult, DEFAULT_CONVERSATIONS_BASE, DEFAULT_THREADS_BASE, UserId};
use serde::{Deserialize, Serialize};

/// Request code the screen uses when it opens the contact picker
pub const CONTACT_PICKER_REQUEST_CODE: u32 = 9721;

/// Notice shown when a picked contact cannot be used
pub const UNREGISTERED_CONTACT_NOTICE: &str = "Contact seems not to be registered.";

/// Main compose screen configuration
///
/// Every field has a default, so a JSON override only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Base reference of the conversation collection
    pub conversations_base: String,
    /// Base reference of the threads-by-user collection
    pub threads_base: String,
    /// Action names the classifier recognizes
    pub actions: ActionNames,
    /// Request code passed to the contact picker
    pub contact_picker_request_code: u32,
    /// Notice shown before the screen ends on an unusable contact
    pub unregistered_notice: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            conversations_base: DEFAULT_CONVERSATIONS_BASE.to_string(),
            threads_base: DEFAULT_THREADS_BASE.to_string(),
            actions: ActionNames::default(),
            contact_picker_request_code: CONTACT_PICKER_REQUEST_CODE,
            unregistered_notice: UNREGISTERED_CONTACT_NOTICE.to_string(),
        }
    }
}

impl ComposeConfig {
    /// Load a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> ComposeResult<Self> {
        serde_json::from_str(json).map_err(|e| ComposeError::Config(e.to_string()))
    }

    /// Reference under the threads collection for a user id
    pub fn user_uri(&self, user_id: &UserId) -> String {
        format!("{}/{}", self.threads_base.trim_end_matches('/'), user_id)
    }

    /// Extract a user id from request data
    ///
    /// A reference under the threads collection yields the id after the base.
    /// Any other data is taken verbatim as the id. Only empty data has none.
    pub fn user_id_from_data(&self, data: &str) -> Option<UserId> {
        let base = self.threads_base.trim_end_matches('/');
        let id = data
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(data);

        (!id.is_empty()).then(|| UserId::new(id))
    }
}

/// Action names for each activation flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionNames {
    /// Generic deep-link view
    pub view: String,
    /// View a conversation by thread
    pub view_conversation: String,
    /// View a conversation by user id
    pub view_user_id: String,
    /// Share external content
    pub send: String,
}

impl Default for ActionNames {
    fn default() -> Self {
        Self {
            view: "android.intent.action.VIEW".to_string(),
            view_conversation: "parley.conversation.VIEW".to_string(),
            view_user_id: "parley.conversation.VIEW_USERID".to_string(),
            send: "android.intent.action.SEND".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComposeConfig::default();
        assert_eq!(config.contact_picker_request_code, 9721);
        assert_eq!(config.conversations_base, DEFAULT_CONVERSATIONS_BASE);
        assert_eq!(config.actions.send, "android.intent.action.SEND");
    }

    #[test]
    fn test_partial_json_override() {
        let config = ComposeConfig::from_json(
            r#"{ "conversations_base": "content://other/conversations", "actions": { "send": "SHARE" } }"#,
        )
        .unwrap();
        assert_eq!(config.conversations_base, "content://other/conversations");
        assert_eq!(config.actions.send, "SHARE");
        assert_eq!(config.actions.view, "android.intent.action.VIEW");
        assert_eq!(config.threads_base, DEFAULT_THREADS_BASE);
    }

    #[test]
    fn test_invalid_json() {
        let err = ComposeConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ComposeError::Config(_)));
        assert!(format!("{}", err).contains("configuration"));
    }

    #[test]
    fn test_user_id_from_data() {
        let config = ComposeConfig::default();
        let user = UserId::new("u1");
        let uri = config.user_uri(&user);
        assert_eq!(uri, "content://parley.messages/threads/u1");

        assert_eq!(config.user_id_from_data(&uri), Some(user.clone()));
        assert_eq!(config.user_id_from_data("u1"), Some(user));
        assert_eq!(config.user_id_from_data(""), None);
        assert_eq!(config.user_id_from_data("content://parley.messages/threads/"), None);
    }

    #[test]
    fn test_user_id_from_foreign_data_kept_verbatim() {
        let config = ComposeConfig::default();
        assert_eq!(
            config.user_id_from_data("content://org.kontalk.messages/threads/abc"),
            Some(UserId::new("content://org.kontalk.messages/threads/abc"))
        );
        assert_eq!(
            config.user_id_from_data("team/alice"),
            Some(UserId::new("team/alice"))
        );
        assert_eq!(
            config.user_id_from_data("content://parley.messages/threads/team/alice"),
            Some(UserId::new("team/alice"))
        );
    }
}
