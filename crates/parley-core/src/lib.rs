//! # Parley Core
//!
//! Core types, traits, and errors for the Parley compose screen.
//!
//! This crate holds everything the compose controller shares with the code
//! around it: the identifiers it passes across the presentation boundary,
//! and the collaborator traits it consumes. Hosts implement the traits over
//! their real contact directory, message store and UI; tests and the
//! simulation use the in-memory versions in [`mock`].
//!
//! ## Key Traits
//!
//! - [`ContactDirectory`]: Maps a picked contact to a registered user id
//! - [`ConversationStore`]: Finds an existing conversation for a user id
//! - [`MessageKindRegistry`]: Classifies MIME types into message kinds
//! - [`PresentationSurface`]: The conversation fragment the screen drives
//! - [`ScreenHost`]: The hosting screen (picker, notices, termination)
//!
//! ## Key Types
//!
//! - [`NormalizedArguments`]: The canonical unit handed to the presentation layer
//! - [`ConversationUri`]: Reference to a conversation thread
//! - [`UserId`], [`ThreadId`], [`ContactRef`]: Identifiers

pub mod arguments;
pub mod conversation;
pub mod error;
pub mod identity;
pub mod kinds;
pub mod mock;
pub mod traits;
pub mod uri;

// Re-export main types
pub use arguments::*;
pub use conversation::*;
pub use error::*;
pub use identity::*;
pub use kinds::*;
pub use traits::*;
pub use uri::*;
