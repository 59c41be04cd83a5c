//! External share dispatch
//!
//! A share arrives before its recipient is known. The payload waits in
//! [`ShareDispatcher`] across the contact picker round trip and is consumed
//! exactly once:
//!
//! ```text
//! Idle ──share──▶ AwaitingContactPick ──picked──▶ ReadyToDispatch ──dispatch──▶ Consumed
//!                        │
//!                        └──cancelled / not registered──▶ Consumed
//! ```
//!
//! Every other transition is a no-op, so duplicate callbacks cannot send the
//! same content twice.

use parley_core::{
    ComposeError, ComposeResult, ContentUri, MessageKindRegistry, PresentationSurface,
};
use tracing::{debug, error, info};

use crate::request::{ShareContent, SharePayload};

/// Where the pending share is in its lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShareState {
    #[default]
    Idle,
    AwaitingContactPick(SharePayload),
    ReadyToDispatch(SharePayload),
    Consumed,
}

/// What a dispatch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing was ready to dispatch
    Nothing,
    /// Text entry was pre-filled
    TextEntry,
    /// An image was sent
    ImageSent,
    /// The payload's kind is not supported and was dropped
    Rejected { mime: String },
}

/// How a payload will be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
enum Delivery {
    Text(String),
    Image(ContentUri),
}

/// Holds a pending share across the contact pick
#[derive(Debug, Default)]
pub struct ShareDispatcher {
    state: ShareState,
}

impl ShareDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ShareState {
        &self.state
    }

    /// Payload waiting to be delivered, if any
    pub fn pending(&self) -> Option<&SharePayload> {
        match &self.state {
            ShareState::AwaitingContactPick(payload) | ShareState::ReadyToDispatch(payload) => {
                Some(payload)
            }
            ShareState::Idle | ShareState::Consumed => None,
        }
    }

    pub fn is_awaiting_pick(&self) -> bool {
        matches!(self.state, ShareState::AwaitingContactPick(_))
    }

    /// Accept a new share and wait for a contact
    ///
    /// A share received while another is still waiting replaces it.
    pub fn begin(&mut self, payload: SharePayload) -> bool {
        match &self.state {
            ShareState::Idle | ShareState::Consumed => {
                self.state = ShareState::AwaitingContactPick(payload);
                true
            }
            ShareState::AwaitingContactPick(previous) => {
                info!(
                    previous = %previous.mime_type,
                    mime = %payload.mime_type,
                    "replacing pending share"
                );
                self.state = ShareState::AwaitingContactPick(payload);
                true
            }
            ShareState::ReadyToDispatch(_) => {
                debug!("share already ready to dispatch, ignoring new share");
                false
            }
        }
    }

    /// A contact was picked and resolved
    pub fn contact_picked(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            ShareState::AwaitingContactPick(payload) => {
                self.state = ShareState::ReadyToDispatch(payload);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Drop the pending payload without delivering it
    pub fn abandon(&mut self) -> Option<SharePayload> {
        match std::mem::take(&mut self.state) {
            ShareState::AwaitingContactPick(payload) | ShareState::ReadyToDispatch(payload) => {
                debug!(mime = %payload.mime_type, "discarding pending share");
                self.state = ShareState::Consumed;
                Some(payload)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Deliver the ready payload to the surface
    ///
    /// Plain text pre-fills the text entry and waits for the user; images are
    /// sent immediately. The payload is cleared whatever the outcome, and a
    /// call with nothing ready does nothing.
    pub fn dispatch<P>(&mut self, kinds: &dyn MessageKindRegistry, surface: &mut P) -> DispatchOutcome
    where
        P: PresentationSurface + ?Sized,
    {
        let payload = match std::mem::take(&mut self.state) {
            ShareState::ReadyToDispatch(payload) => payload,
            other => {
                self.state = other;
                debug!("no share ready to dispatch");
                return DispatchOutcome::Nothing;
            }
        };
        self.state = ShareState::Consumed;

        match delivery(&payload, kinds) {
            Ok(Delivery::Text(text)) => {
                surface.set_text_entry(&text);
                DispatchOutcome::TextEntry
            }
            Ok(Delivery::Image(content)) => {
                info!(mime = %payload.mime_type, content = %content, "sending shared image");
                surface.send_image(&content, &payload.mime_type);
                DispatchOutcome::ImageSent
            }
            Err(e) => {
                error!(error = %e, "share not supported");
                DispatchOutcome::Rejected {
                    mime: payload.mime_type,
                }
            }
        }
    }
}

fn delivery(payload: &SharePayload, kinds: &dyn MessageKindRegistry) -> ComposeResult<Delivery> {
    let mime = payload.mime_type.as_str();

    if kinds.supports_plain_text(mime) {
        if let ShareContent::InlineText(text) = &payload.content {
            return Ok(Delivery::Text(text.clone()));
        }
    } else if kinds.supports_image(mime) {
        if let ShareContent::ContentReference(content) = &payload.content {
            return Ok(Delivery::Image(content.clone()));
        }
    }

    Err(ComposeError::UnsupportedShareKind(mime.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::DefaultMessageKinds;
    use parley_core::mock::RecordingSurface;

    fn ready(payload: SharePayload) -> ShareDispatcher {
        let mut dispatcher = ShareDispatcher::new();
        assert!(dispatcher.begin(payload));
        assert!(dispatcher.contact_picked());
        dispatcher
    }

    #[test]
    fn test_text_prefills_entry() {
        let kinds = DefaultMessageKinds::new();
        let mut surface = RecordingSurface::new();
        let mut dispatcher = ready(SharePayload::text("text/plain", "hello"));

        assert_eq!(dispatcher.dispatch(&kinds, &mut surface), DispatchOutcome::TextEntry);
        assert_eq!(surface.text_entries(), vec!["hello"]);
        assert!(surface.sent_images().is_empty());
        assert_eq!(dispatcher.state(), &ShareState::Consumed);
        assert!(dispatcher.pending().is_none());
    }

    #[test]
    fn test_image_sends_once() {
        let kinds = DefaultMessageKinds::new();
        let mut surface = RecordingSurface::new();
        let content = ContentUri::new("content://media/1");
        let mut dispatcher = ready(SharePayload::stream("image/jpeg", content.clone()));

        assert_eq!(dispatcher.dispatch(&kinds, &mut surface), DispatchOutcome::ImageSent);
        assert_eq!(dispatcher.dispatch(&kinds, &mut surface), DispatchOutcome::Nothing);
        assert_eq!(surface.sent_images(), vec![(&content, "image/jpeg")]);
    }

    #[test]
    fn test_unsupported_kind_discarded() {
        let kinds = DefaultMessageKinds::new();
        let mut surface = RecordingSurface::new();
        let mut dispatcher = ready(SharePayload::stream(
            "application/pdf",
            ContentUri::new("content://docs/1"),
        ));

        assert_eq!(
            dispatcher.dispatch(&kinds, &mut surface),
            DispatchOutcome::Rejected {
                mime: "application/pdf".into()
            }
        );
        assert!(surface.calls().is_empty());
        assert!(dispatcher.pending().is_none());
    }

    #[test]
    fn test_content_kind_mismatch_rejected() {
        let kinds = DefaultMessageKinds::new();
        let mut surface = RecordingSurface::new();
        let mut dispatcher = ready(SharePayload::text("image/png", "not an image"));

        assert!(matches!(
            dispatcher.dispatch(&kinds, &mut surface),
            DispatchOutcome::Rejected { .. }
        ));
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_dispatch_requires_pick() {
        let kinds = DefaultMessageKinds::new();
        let mut surface = RecordingSurface::new();
        let mut dispatcher = ShareDispatcher::new();
        assert_eq!(dispatcher.dispatch(&kinds, &mut surface), DispatchOutcome::Nothing);

        dispatcher.begin(SharePayload::text("text/plain", "hi"));
        assert_eq!(dispatcher.dispatch(&kinds, &mut surface), DispatchOutcome::Nothing);
        assert!(dispatcher.is_awaiting_pick());
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_abandon() {
        let mut dispatcher = ShareDispatcher::new();
        assert!(dispatcher.abandon().is_none());
        assert_eq!(dispatcher.state(), &ShareState::Idle);

        dispatcher.begin(SharePayload::text("text/plain", "hi"));
        assert!(dispatcher.abandon().is_some());
        assert_eq!(dispatcher.state(), &ShareState::Consumed);
        assert!(!dispatcher.contact_picked());
    }

    #[test]
    fn test_new_share_replaces_waiting_one() {
        let mut dispatcher = ShareDispatcher::new();
        dispatcher.begin(SharePayload::text("text/plain", "first"));
        assert!(dispatcher.begin(SharePayload::text("text/plain", "second")));
        assert_eq!(
            dispatcher.pending(),
            Some(&SharePayload::text("text/plain", "second"))
        );
    }

    #[test]
    fn test_share_after_consumed() {
        let mut dispatcher = ShareDispatcher::new();
        dispatcher.begin(SharePayload::text("text/plain", "first"));
        dispatcher.abandon();
        assert!(dispatcher.begin(SharePayload::text("text/plain", "again")));
        assert!(dispatcher.is_awaiting_pick());
    }
}
