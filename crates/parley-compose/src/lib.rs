//! # Parley Compose
//!
//! Activation request resolution for the Parley compose screen.
//!
//! The compose screen opens from many places: a deep link to a conversation,
//! a "message this user" shortcut, a restored instance after process death,
//! or another app sharing text or an image. This crate reduces all of them to
//! one [`NormalizedArguments`](parley_core::NormalizedArguments) handed to the
//! presentation surface, running a contact pick first when a share does not
//! know its recipient yet.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use parley_compose::{Collaborators, ComposeConfig, RawRequest, ScreenController};
//! use parley_core::DefaultMessageKinds;
//!
//! let config = ComposeConfig::default();
//! let collaborators = Collaborators {
//!     contacts: Arc::new(contacts),
//!     conversations: Arc::new(store),
//!     kinds: Arc::new(DefaultMessageKinds::new()),
//! };
//! let mut screen = ScreenController::new(config.clone(), collaborators, surface, host);
//!
//! // Another app shares some text: the contact picker opens
//! screen.activate(Some(&RawRequest::share_text(&config, "text/plain", "hello")), None);
//!
//! // The user picks a contact: the conversation loads and the text is pre-filled
//! screen.on_activity_result(9721, parley_compose::RESULT_OK, Some(picked));
//! ```

pub mod config;
pub mod controller;
pub mod request;
pub mod resolver;
pub mod share;
pub mod state;

// Re-exports
pub use config::{ActionNames, CONTACT_PICKER_REQUEST_CODE, ComposeConfig, UNREGISTERED_CONTACT_NOTICE};
pub use controller::{
    Collaborators, PickResult, RESULT_CANCELED, RESULT_OK, ScreenController, ScreenOutcome,
};
pub use request::{ActivationRequest, RawRequest, ShareContent, SharePayload, classify};
pub use resolver::{ContactResolver, ConversationResolver, compose_target_for_contact};
pub use share::{DispatchOutcome, ShareDispatcher, ShareState};
pub use state::SavedState;
