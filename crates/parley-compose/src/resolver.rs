//! Contact and conversation resolution
//!
//! After a contact pick the screen needs to know who was picked and whether
//! a thread with them already exists. [`ContactResolver`] answers the first
//! question, [`ConversationResolver`] the second, and
//! [`ConversationResolver::build_compose_target`] turns the answer into the
//! arguments the presentation surface loads.

use std::sync::Arc;

use parley_core::{
    ComposeError, ComposeResult, ContactDirectory, ContactRef, Conversation, ConversationStore,
    NormalizedArguments, UserId,
};
use tracing::debug;

/// Resolves picked contacts to registered user ids
#[derive(Clone)]
pub struct ContactResolver {
    directory: Arc<dyn ContactDirectory>,
}

impl ContactResolver {
    pub fn new(directory: Arc<dyn ContactDirectory>) -> Self {
        Self { directory }
    }

    /// Registered user id for a contact, or `None` if not registered
    pub fn resolve_user_id(&self, contact: &ContactRef) -> ComposeResult<Option<UserId>> {
        self.directory.resolve_user_id(contact)
    }
}

/// Resolves user ids to existing conversations
#[derive(Clone)]
pub struct ConversationResolver {
    store: Arc<dyn ConversationStore>,
    conversations_base: String,
}

impl ConversationResolver {
    pub fn new(store: Arc<dyn ConversationStore>, conversations_base: impl Into<String>) -> Self {
        Self {
            store,
            conversations_base: conversations_base.into(),
        }
    }

    /// Existing conversation with the user, if any
    pub fn find_by_user_id(&self, user_id: &UserId) -> ComposeResult<Option<Conversation>> {
        self.store.find_by_user_id(user_id)
    }

    /// Arguments for composing to a user
    ///
    /// Continues the existing thread when there is one, otherwise targets the
    /// user id with no thread.
    pub fn build_compose_target(&self, user_id: &UserId) -> ComposeResult<NormalizedArguments> {
        match self.find_by_user_id(user_id)? {
            Some(conversation) => {
                debug!(user = %user_id, thread = %conversation.thread_id, "continuing conversation");
                Ok(NormalizedArguments::view_conversation(
                    conversation.uri(&self.conversations_base),
                ))
            }
            None => {
                debug!(user = %user_id, "no conversation yet, composing new thread");
                Ok(NormalizedArguments::view_user(user_id.clone()))
            }
        }
    }
}

/// Arguments for composing to a picked contact
///
/// Fails with [`ComposeError::ContactNotRegistered`] when the contact has no
/// user id.
pub fn compose_target_for_contact(
    contacts: &ContactResolver,
    conversations: &ConversationResolver,
    contact: &ContactRef,
) -> ComposeResult<NormalizedArguments> {
    let user_id = contacts
        .resolve_user_id(contact)?
        .ok_or_else(|| ComposeError::ContactNotRegistered(contact.clone()))?;

    conversations.build_compose_target(&user_id)
}
