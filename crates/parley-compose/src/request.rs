//! Activation request classification
//!
//! A [`RawRequest`] is what the platform hands the screen: an action string,
//! an optional data reference, and the extras a share carries. [`classify`]
//! reduces it to one of four [`ActivationRequest`] variants, each holding only
//! the fields its flow needs.

use parley_core::{
    ComposeError, ComposeResult, ContentUri, ConversationUri, NormalizedArguments, ThreadId,
    UserId, kinds,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ComposeConfig;
use crate::state::SavedState;

/// Platform-shaped activation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRequest {
    /// Action name
    pub action: Option<String>,
    /// Data reference (conversation or user)
    pub data: Option<String>,
    /// MIME type of shared content
    pub mime_type: Option<String>,
    /// Inline shared text
    pub text: Option<String>,
    /// Reference to shared binary content
    pub stream: Option<String>,
}

impl RawRequest {
    /// Request with only an action and data
    pub fn new(action: impl Into<String>, data: Option<String>) -> Self {
        Self {
            action: Some(action.into()),
            data,
            ..Default::default()
        }
    }

    /// Request to view a thread
    pub fn view_conversation(config: &ComposeConfig, thread_id: ThreadId) -> Self {
        let uri = ConversationUri::for_thread(&config.conversations_base, thread_id);
        Self::new(
            config.actions.view_conversation.clone(),
            Some(uri.as_str().to_string()),
        )
    }

    /// Request to compose to a user
    pub fn view_user(config: &ComposeConfig, user_id: &UserId) -> Self {
        Self::new(config.actions.view_user_id.clone(), Some(config.user_uri(user_id)))
    }

    /// Request sharing inline text
    pub fn share_text(config: &ComposeConfig, mime: &str, text: impl Into<String>) -> Self {
        Self {
            action: Some(config.actions.send.clone()),
            mime_type: Some(mime.to_string()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Request sharing a content stream
    pub fn share_stream(config: &ComposeConfig, mime: &str, stream: impl Into<String>) -> Self {
        Self {
            action: Some(config.actions.send.clone()),
            mime_type: Some(mime.to_string()),
            stream: Some(stream.into()),
            ..Default::default()
        }
    }
}

/// Content of an external share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareContent {
    InlineText(String),
    ContentReference(ContentUri),
}

/// Content shared into the app, waiting for a recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub mime_type: String,
    pub content: ShareContent,
}

impl SharePayload {
    pub fn text(mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            content: ShareContent::InlineText(text.into()),
        }
    }

    pub fn stream(mime_type: impl Into<String>, content: ContentUri) -> Self {
        Self {
            mime_type: mime_type.into(),
            content: ShareContent::ContentReference(content),
        }
    }
}

/// A classified activation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationRequest {
    /// Generic deep-link view
    ViewGeneric(ConversationUri),
    /// View a conversation thread
    ViewConversation(ConversationUri),
    /// Compose to a user
    ViewByUserId(UserId),
    /// Share external content to a contact still to be picked
    Share(SharePayload),
}

impl ActivationRequest {
    /// Request rebuilt from saved state
    ///
    /// Always a conversation view of the saved reference, whatever the
    /// original request was.
    pub fn restored(saved: &SavedState) -> Self {
        ActivationRequest::ViewConversation(saved.conversation.clone())
    }

    /// Arguments to forward, or `None` for a share
    pub fn arguments(&self) -> Option<NormalizedArguments> {
        match self {
            ActivationRequest::ViewGeneric(uri) => Some(NormalizedArguments::view(uri.clone())),
            ActivationRequest::ViewConversation(uri) => {
                Some(NormalizedArguments::view_conversation(uri.clone()))
            }
            ActivationRequest::ViewByUserId(user) => {
                Some(NormalizedArguments::view_user(user.clone()))
            }
            ActivationRequest::Share(_) => None,
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ActivationRequest::ViewGeneric(_) => "view",
            ActivationRequest::ViewConversation(_) => "view_conversation",
            ActivationRequest::ViewByUserId(_) => "view_user_id",
            ActivationRequest::Share(_) => "share",
        }
    }
}

/// Classify a raw request
///
/// Returns [`ComposeError::UnrecognizedAction`] for anything that should
/// leave the screen inert: an unknown or absent action, a view without data,
/// or a share without a MIME type or content.
pub fn classify(raw: &RawRequest, config: &ComposeConfig) -> ComposeResult<ActivationRequest> {
    let Some(action) = raw.action.as_deref() else {
        return Err(ComposeError::UnrecognizedAction("<none>".to_string()));
    };
    let actions = &config.actions;

    let request = if action == actions.view {
        ActivationRequest::ViewGeneric(ConversationUri::new(required_data(raw, action)?))
    } else if action == actions.view_conversation {
        ActivationRequest::ViewConversation(ConversationUri::new(required_data(raw, action)?))
    } else if action == actions.view_user_id {
        let data = required_data(raw, action)?;
        let user = config
            .user_id_from_data(data)
            .ok_or_else(|| ComposeError::UnrecognizedAction(format!("{action} for {data}")))?;
        ActivationRequest::ViewByUserId(user)
    } else if action == actions.send {
        ActivationRequest::Share(share_payload(raw, action)?)
    } else {
        return Err(ComposeError::UnrecognizedAction(action.to_string()));
    };

    match &request {
        ActivationRequest::Share(payload) => {
            info!(mime = %payload.mime_type, "sharing data to someone");
        }
        other => {
            debug!(kind = other.kind(), data = ?raw.data, "classified view request");
        }
    }

    Ok(request)
}

fn required_data<'a>(raw: &'a RawRequest, action: &str) -> ComposeResult<&'a str> {
    raw.data
        .as_deref()
        .filter(|data| !data.is_empty())
        .ok_or_else(|| ComposeError::UnrecognizedAction(format!("{action} without data")))
}

fn share_payload(raw: &RawRequest, action: &str) -> ComposeResult<SharePayload> {
    let Some(mime) = raw.mime_type.as_deref() else {
        return Err(ComposeError::UnrecognizedAction(format!(
            "{action} without mime type"
        )));
    };

    // Text-like types read the inline text first; everything else the stream
    let prefer_text = kinds::essence(mime).starts_with("text/");

    let content = match (&raw.text, &raw.stream) {
        (Some(text), Some(_)) if prefer_text => ShareContent::InlineText(text.clone()),
        (_, Some(stream)) => ShareContent::ContentReference(ContentUri::new(stream.clone())),
        (Some(text), None) => ShareContent::InlineText(text.clone()),
        (None, None) => {
            return Err(ComposeError::UnrecognizedAction(format!(
                "{action} without content"
            )));
        }
    };

    Ok(SharePayload {
        mime_type: mime.to_string(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ComposeConfig {
        ComposeConfig::default()
    }

    #[test]
    fn test_view_conversation() {
        let config = config();
        let raw = RawRequest::view_conversation(&config, ThreadId::new(5));
        let request = classify(&raw, &config).unwrap();

        let uri = ConversationUri::for_thread(&config.conversations_base, ThreadId::new(5));
        assert_eq!(request, ActivationRequest::ViewConversation(uri.clone()));
        assert_eq!(
            request.arguments(),
            Some(NormalizedArguments::view_conversation(uri))
        );
    }

    #[test]
    fn test_generic_view_keeps_data_verbatim() {
        let config = config();
        let raw = RawRequest::new(config.actions.view.clone(), Some("content://x/1".into()));
        let request = classify(&raw, &config).unwrap();
        assert_eq!(
            request.arguments(),
            Some(NormalizedArguments::view(ConversationUri::new("content://x/1")))
        );
    }

    #[test]
    fn test_view_user_id() {
        let config = config();
        let raw = RawRequest::view_user(&config, &UserId::new("u1"));
        let request = classify(&raw, &config).unwrap();
        assert_eq!(request, ActivationRequest::ViewByUserId(UserId::new("u1")));

        let bare = RawRequest::new(config.actions.view_user_id.clone(), Some("u2".into()));
        assert_eq!(
            classify(&bare, &config).unwrap(),
            ActivationRequest::ViewByUserId(UserId::new("u2"))
        );
    }

    #[test]
    fn test_view_user_id_with_slash() {
        let config = config();
        let user = UserId::new("team/alice");
        let request = classify(&RawRequest::view_user(&config, &user), &config).unwrap();
        assert_eq!(
            request.arguments(),
            Some(NormalizedArguments::view_user(user))
        );
    }

    #[test]
    fn test_view_user_id_foreign_reference() {
        let config = config();
        let data = "content://org.kontalk.messages/threads/abc";
        let raw = RawRequest::new(config.actions.view_user_id.clone(), Some(data.into()));
        assert_eq!(
            classify(&raw, &config).unwrap(),
            ActivationRequest::ViewByUserId(UserId::new(data))
        );

        let empty = RawRequest::new(config.actions.view_user_id.clone(), Some(String::new()));
        assert!(classify(&empty, &config).is_err());
    }

    #[test]
    fn test_share_text() {
        let config = config();
        let raw = RawRequest::share_text(&config, "text/plain", "hello");
        let request = classify(&raw, &config).unwrap();
        assert_eq!(
            request,
            ActivationRequest::Share(SharePayload::text("text/plain", "hello"))
        );
        assert!(request.arguments().is_none());
    }

    #[test]
    fn test_share_stream() {
        let config = config();
        let raw = RawRequest::share_stream(&config, "image/jpeg", "content://media/9");
        let request = classify(&raw, &config).unwrap();
        assert_eq!(
            request,
            ActivationRequest::Share(SharePayload::stream(
                "image/jpeg",
                ContentUri::new("content://media/9")
            ))
        );
    }

    #[test]
    fn test_share_with_both_extras() {
        let config = config();
        let mut raw = RawRequest::share_text(&config, "text/plain", "hi");
        raw.stream = Some("content://media/1".into());
        let request = classify(&raw, &config).unwrap();
        assert!(matches!(
            request,
            ActivationRequest::Share(SharePayload { content: ShareContent::InlineText(_), .. })
        ));

        raw.mime_type = Some("image/png".into());
        let request = classify(&raw, &config).unwrap();
        assert!(matches!(
            request,
            ActivationRequest::Share(SharePayload {
                content: ShareContent::ContentReference(_),
                ..
            })
        ));
    }

    #[test]
    fn test_inert_requests() {
        let config = config();

        let unknown = RawRequest::new("android.intent.action.MAIN", None);
        assert!(matches!(
            classify(&unknown, &config),
            Err(ComposeError::UnrecognizedAction(_))
        ));

        assert!(classify(&RawRequest::default(), &config).is_err());

        let no_data = RawRequest::new(config.actions.view_conversation.clone(), None);
        assert!(classify(&no_data, &config).is_err());

        let mut no_mime = RawRequest::share_text(&config, "text/plain", "x");
        no_mime.mime_type = None;
        assert!(classify(&no_mime, &config).is_err());

        let no_content = RawRequest {
            action: Some(config.actions.send.clone()),
            mime_type: Some("text/plain".into()),
            ..Default::default()
        };
        assert!(classify(&no_content, &config).is_err());
    }

    #[test]
    fn test_restored_matches_direct_view() {
        let config = config();
        let saved = SavedState::for_thread(&config, ThreadId::new(42));
        let restored = ActivationRequest::restored(&saved);

        let direct = classify(
            &RawRequest::view_conversation(&config, ThreadId::new(42)),
            &config,
        )
        .unwrap();
        assert_eq!(restored.arguments(), direct.arguments());
    }

    #[test]
    fn test_raw_request_from_json() {
        let raw: RawRequest =
            serde_json::from_str(r#"{ "action": "parley.conversation.VIEW", "data": "content://x/3" }"#)
                .unwrap();
        assert_eq!(raw.action.as_deref(), Some("parley.conversation.VIEW"));
        assert!(raw.mime_type.is_none());
    }
}
