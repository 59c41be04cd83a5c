//! Scripted screen runs
//!
//! A [`Script`] describes a small world (registered contacts, existing
//! conversations) and a sequence of lifecycle events. [`run_script`] plays
//! the events against a [`ScreenController`] backed by in-memory
//! collaborators and reports every outcome.
//!
//! ```json
//! {
//!   "contacts": { "contact/alice": "u7" },
//!   "conversations": { "u7": 7 },
//!   "events": [
//!     { "type": "activate", "request": { "action": "android.intent.action.SEND",
//!       "mime_type": "text/plain", "text": "hello" } },
//!     { "type": "pick", "result_code": -1, "contact": "contact/alice" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parley_compose::{
    Collaborators, ComposeConfig, RawRequest, SavedState, ScreenController, ScreenOutcome,
};
use parley_core::mock::{
    MemoryContactDirectory, MemoryConversationStore, RecordingHost, RecordingSurface,
};
use parley_core::{ContactRef, ConversationUri, DefaultMessageKinds};
use parley_logging::ScreenContextGuard;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A lifecycle event delivered to the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Fresh or restored launch
    Activate {
        #[serde(default)]
        request: Option<RawRequest>,
        /// Conversation reference of a saved state
        #[serde(default)]
        saved: Option<ConversationUri>,
    },
    /// New request while the screen is active
    Redeliver { request: RawRequest },
    /// Sub-flow result
    Pick {
        #[serde(default = "default_request_code")]
        request_code: u32,
        result_code: i32,
        #[serde(default)]
        contact: Option<String>,
    },
    /// Save state, then restore it into the same screen
    SaveRestore,
}

fn default_request_code() -> u32 {
    parley_compose::CONTACT_PICKER_REQUEST_CODE
}

/// A world and the events to play in it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Contact reference -> registered user id
    pub contacts: BTreeMap<String, String>,
    /// User id -> existing thread id
    pub conversations: BTreeMap<String, i64>,
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Parse a script from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_contact(mut self, contact: &str, user_id: &str) -> Self {
        self.contacts.insert(contact.to_string(), user_id.to_string());
        self
    }

    pub fn with_conversation(mut self, user_id: &str, thread_id: i64) -> Self {
        self.conversations.insert(user_id.to_string(), thread_id);
        self
    }

    pub fn event(mut self, event: ScriptEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Result of playing a script
pub struct Report {
    /// Outcome of each event, in order
    pub outcomes: Vec<ScreenOutcome>,
    pub surface: RecordingSurface,
    pub host: RecordingHost,
}

impl Report {
    /// Human-readable summary
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, outcome) in self.outcomes.iter().enumerate() {
            out.push_str(&format!("  event {}: {:?}\n", i + 1, outcome));
        }
        out.push_str("  surface:\n");
        for call in self.surface.calls() {
            out.push_str(&format!("    {:?}\n", call));
        }
        out.push_str("  host:\n");
        for call in self.host.calls() {
            out.push_str(&format!("    {:?}\n", call));
        }
        out
    }
}

/// Play a script against a fresh screen
pub fn run_script(label: &str, script: &Script, config: &ComposeConfig) -> Report {
    let contacts = script
        .contacts
        .iter()
        .fold(MemoryContactDirectory::new(), |dir, (contact, user)| {
            dir.with_contact(contact, user)
        });
    let store = script
        .conversations
        .iter()
        .fold(MemoryConversationStore::new(), |store, (user, thread)| {
            store.with_conversation(*thread, user)
        });

    let collaborators = Collaborators {
        contacts: Arc::new(contacts),
        conversations: Arc::new(store),
        kinds: Arc::new(DefaultMessageKinds::new()),
    };
    let mut screen = ScreenController::new(
        config.clone(),
        collaborators,
        RecordingSurface::new(),
        RecordingHost::new(),
    );

    let _guard = ScreenContextGuard::new(screen.screen_id(), label);
    info!(events = script.events.len(), "running script");

    let mut outcomes = Vec::with_capacity(script.events.len());
    for event in &script.events {
        let outcome = match event {
            ScriptEvent::Activate { request, saved } => {
                let saved = saved.clone().map(SavedState::new);
                screen.activate(request.as_ref(), saved.as_ref())
            }
            ScriptEvent::Redeliver { request } => screen.on_request_redelivered(request),
            ScriptEvent::Pick {
                request_code,
                result_code,
                contact,
            } => screen.on_activity_result(
                *request_code,
                *result_code,
                contact.as_deref().map(ContactRef::new),
            ),
            ScriptEvent::SaveRestore => match screen.save_state() {
                Some(saved) => screen.on_restore_state(&saved),
                None => ScreenOutcome::Ignored,
            },
        };
        outcomes.push(outcome);
    }

    Report {
        outcomes,
        surface: screen.surface().clone(),
        host: screen.host().clone(),
    }
}
