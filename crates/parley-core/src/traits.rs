//! Collaborator traits for the compose screen
//!
//! The screen controller owns no storage and renders nothing. It reaches the
//! rest of the application only through these traits:
//!
//! - [`ContactDirectory`] and [`ConversationStore`]: read-only queries, shared
//!   behind `Arc` and therefore `Send + Sync`
//! - [`MessageKindRegistry`]: MIME type capability checks
//! - [`PresentationSurface`]: the conversation fragment, owned by the screen
//! - [`ScreenHost`]: the hosting screen, owned by the screen

use crate::arguments::NormalizedArguments;
use crate::conversation::Conversation;
use crate::error::ComposeResult;
use crate::identity::{ContactRef, ThreadId, UserId};
use crate::uri::ContentUri;

/// Lookup of registered users for device contacts
pub trait ContactDirectory: Send + Sync {
    /// Resolve a picked contact to its registered user id
    ///
    /// Returns `Ok(None)` if the contact is not a registered user.
    fn resolve_user_id(&self, contact: &ContactRef) -> ComposeResult<Option<UserId>>;
}

/// Lookup of existing conversations
pub trait ConversationStore: Send + Sync {
    /// Find the conversation whose participant is the given user
    fn find_by_user_id(&self, user_id: &UserId) -> ComposeResult<Option<Conversation>>;
}

/// Capability checks for message kinds
pub trait MessageKindRegistry: Send + Sync {
    /// Whether the MIME type can be sent as a plain text message
    fn supports_plain_text(&self, mime: &str) -> bool;

    /// Whether the MIME type can be sent as an image message
    fn supports_image(&self, mime: &str) -> bool;
}

/// The presentation fragment that renders a conversation
pub trait PresentationSurface {
    /// Hand the arguments the fragment should load
    fn set_initial_arguments(&mut self, args: NormalizedArguments);

    /// Pre-fill the text entry. Nothing is sent.
    fn set_text_entry(&mut self, text: &str);

    /// Send an image message right away
    fn send_image(&mut self, content: &ContentUri, mime: &str);

    /// Reload the whole view from the current arguments
    fn reload_from_arguments(&mut self);

    /// Thread currently open, if the conversation has one yet
    fn current_thread_id(&self) -> Option<ThreadId>;
}

/// The screen hosting the controller
pub trait ScreenHost {
    /// Start the contact picker. Completion is reported back through the
    /// controller's pick-completed entry point with the same request code.
    fn open_contact_picker(&mut self, request_code: u32);

    /// Show a short user-visible notice
    fn show_notice(&mut self, message: &str);

    /// End the screen
    fn finish(&mut self);
}
