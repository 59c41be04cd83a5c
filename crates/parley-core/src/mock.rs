//! In-memory collaborators for testing
//!
//! Lets the compose controller run without a real contact database, message
//! store or UI. The surface and host record every call so tests can assert on
//! exactly what the controller asked for.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parley_core::mock::{MemoryContactDirectory, MemoryConversationStore, RecordingSurface};
//!
//! let contacts = MemoryContactDirectory::new().with_contact("content://contacts/1", "u1");
//! let store = MemoryConversationStore::new().with_conversation(7, "u1");
//! let surface = RecordingSurface::new();
//! ```

use std::collections::HashMap;

use crate::arguments::NormalizedArguments;
use crate::conversation::Conversation;
use crate::error::{ComposeError, ComposeResult};
use crate::identity::{ContactRef, ThreadId, UserId};
use crate::traits::{ContactDirectory, ConversationStore, PresentationSurface, ScreenHost};
use crate::uri::ContentUri;

/// Contact directory backed by a map
#[derive(Debug, Default, Clone)]
pub struct MemoryContactDirectory {
    contacts: HashMap<ContactRef, UserId>,
    failure: Option<String>,
}

impl MemoryContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contact reference as the given user
    pub fn with_contact(mut self, contact: &str, user_id: &str) -> Self {
        self.contacts
            .insert(ContactRef::new(contact), UserId::new(user_id));
        self
    }

    /// Make every lookup fail with the given message
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl ContactDirectory for MemoryContactDirectory {
    fn resolve_user_id(&self, contact: &ContactRef) -> ComposeResult<Option<UserId>> {
        if let Some(message) = &self.failure {
            return Err(ComposeError::Directory(message.clone()));
        }
        Ok(self.contacts.get(contact).cloned())
    }
}

/// Conversation store backed by a map keyed on participant
#[derive(Debug, Default, Clone)]
pub struct MemoryConversationStore {
    conversations: HashMap<UserId, Conversation>,
    failure: Option<String>,
}

impl MemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a conversation with the given user on the given thread
    pub fn with_conversation(mut self, thread_id: i64, user_id: &str) -> Self {
        let user = UserId::new(user_id);
        self.conversations
            .insert(user.clone(), Conversation::new(ThreadId::new(thread_id), user));
        self
    }

    /// Make every lookup fail with the given message
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl ConversationStore for MemoryConversationStore {
    fn find_by_user_id(&self, user_id: &UserId) -> ComposeResult<Option<Conversation>> {
        if let Some(message) = &self.failure {
            return Err(ComposeError::Store(message.clone()));
        }
        Ok(self.conversations.get(user_id).cloned())
    }
}

/// A call observed by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    SetInitialArguments(NormalizedArguments),
    SetTextEntry(String),
    SendImage { content: ContentUri, mime: String },
    Reload,
}

/// Presentation surface that records calls instead of rendering
///
/// The open thread follows the last conversation arguments received, unless
/// pinned with [`RecordingSurface::with_thread`].
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    thread_id: Option<ThreadId>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the given thread is open
    pub fn with_thread(mut self, thread_id: i64) -> Self {
        self.thread_id = Some(ThreadId::new(thread_id));
        self
    }

    /// All calls in order
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Arguments forwarded so far
    pub fn forwarded(&self) -> Vec<&NormalizedArguments> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::SetInitialArguments(args) => Some(args),
                _ => None,
            })
            .collect()
    }

    /// Text entry pre-fills so far
    pub fn text_entries(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::SetTextEntry(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Images sent so far
    pub fn sent_images(&self) -> Vec<(&ContentUri, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::SendImage { content, mime } => Some((content, mime.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Number of reloads requested
    pub fn reload_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Reload))
            .count()
    }
}

impl PresentationSurface for RecordingSurface {
    fn set_initial_arguments(&mut self, args: NormalizedArguments) {
        self.thread_id = args.conversation_uri().and_then(|uri| uri.thread_id());
        self.calls.push(SurfaceCall::SetInitialArguments(args));
    }

    fn set_text_entry(&mut self, text: &str) {
        self.calls.push(SurfaceCall::SetTextEntry(text.to_string()));
    }

    fn send_image(&mut self, content: &ContentUri, mime: &str) {
        self.calls.push(SurfaceCall::SendImage {
            content: content.clone(),
            mime: mime.to_string(),
        });
    }

    fn reload_from_arguments(&mut self) {
        self.calls.push(SurfaceCall::Reload);
    }

    fn current_thread_id(&self) -> Option<ThreadId> {
        self.thread_id
    }
}

/// A call observed by [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    OpenContactPicker(u32),
    ShowNotice(String),
    Finish,
}

/// Screen host that records calls
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Number of times the contact picker was opened
    pub fn pickers_opened(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::OpenContactPicker(_)))
            .count()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::ShowNotice(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn finished(&self) -> bool {
        self.calls.contains(&HostCall::Finish)
    }
}

impl ScreenHost for RecordingHost {
    fn open_contact_picker(&mut self, request_code: u32) {
        self.calls.push(HostCall::OpenContactPicker(request_code));
    }

    fn show_notice(&mut self, message: &str) {
        self.calls.push(HostCall::ShowNotice(message.to_string()));
    }

    fn finish(&mut self) {
        self.calls.push(HostCall::Finish);
    }
}
