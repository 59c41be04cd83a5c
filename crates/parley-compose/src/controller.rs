//! Compose screen controller
//!
//! Owns the request lifecycle of the compose screen: fresh launch, restore
//! after process death, redelivered requests, and the contact picker round
//! trip a share needs before it has a recipient.
//!
//! All entry points run on the hosting UI thread and return a
//! [`ScreenOutcome`]. Nothing here fails outward: every error ends as either
//! a notice followed by termination, or an inert screen.

use std::sync::Arc;

use parley_core::{
    ComposeError, ComposeResult, ContactDirectory, ContactRef, ConversationStore,
    MessageKindRegistry, NormalizedArguments, PresentationSurface, ScreenHost,
};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::ComposeConfig;
use crate::request::{ActivationRequest, RawRequest, SharePayload, classify};
use crate::resolver::{ContactResolver, ConversationResolver, compose_target_for_contact};
use crate::share::{DispatchOutcome, ShareDispatcher};
use crate::state::SavedState;

/// Platform result code for a completed sub-flow
pub const RESULT_OK: i32 = -1;

/// Platform result code for a cancelled sub-flow
pub const RESULT_CANCELED: i32 = 0;

/// Result of the contact picking sub-flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickResult {
    Ok,
    Canceled,
}

impl PickResult {
    /// Map a platform result code; anything but OK counts as cancelled
    pub fn from_code(code: i32) -> Self {
        if code == RESULT_OK {
            PickResult::Ok
        } else {
            PickResult::Canceled
        }
    }
}

/// What an entry point did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOutcome {
    /// New arguments were handed to the surface
    Forwarded(NormalizedArguments),
    /// The same arguments were already forwarded
    Unchanged,
    /// The contact picker is open for a share
    AwaitingContactPick,
    /// A contact pick resolved; arguments forwarded and the share dispatched
    Dispatched {
        args: NormalizedArguments,
        share: DispatchOutcome,
    },
    /// The screen ended
    Terminated { notice: Option<String> },
    /// A callback arrived that nothing was waiting for
    Ignored,
    /// The request matched no flow
    Inert,
}

/// Query collaborators shared with the rest of the application
#[derive(Clone)]
pub struct Collaborators {
    pub contacts: Arc<dyn ContactDirectory>,
    pub conversations: Arc<dyn ConversationStore>,
    pub kinds: Arc<dyn MessageKindRegistry>,
}

/// Controller for the compose screen
pub struct ScreenController<P: PresentationSurface, H: ScreenHost> {
    /// Instance id stamped on every span
    screen_id: Uuid,
    config: ComposeConfig,
    contacts: ContactResolver,
    conversations: ConversationResolver,
    kinds: Arc<dyn MessageKindRegistry>,
    surface: P,
    host: H,
    /// Pending external share
    share: ShareDispatcher,
    /// Last arguments handed to the surface
    current: Option<NormalizedArguments>,
    finished: bool,
}

impl<P: PresentationSurface, H: ScreenHost> ScreenController<P, H> {
    /// Create a controller driving the given surface and host
    pub fn new(config: ComposeConfig, collaborators: Collaborators, surface: P, host: H) -> Self {
        let conversations =
            ConversationResolver::new(collaborators.conversations, config.conversations_base.clone());

        Self {
            screen_id: Uuid::new_v4(),
            contacts: ContactResolver::new(collaborators.contacts),
            conversations,
            kinds: collaborators.kinds,
            config,
            surface,
            host,
            share: ShareDispatcher::new(),
            current: None,
            finished: false,
        }
    }

    pub fn screen_id(&self) -> Uuid {
        self.screen_id
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Arguments the surface is currently showing
    pub fn current_arguments(&self) -> Option<&NormalizedArguments> {
        self.current.as_ref()
    }

    /// Share waiting for a recipient, if any
    pub fn pending_share(&self) -> Option<&SharePayload> {
        self.share.pending()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Entry point for a fresh or restored launch
    ///
    /// Saved state wins over the live request: a restored screen always
    /// reopens the conversation it had open.
    pub fn activate(
        &mut self,
        request: Option<&RawRequest>,
        saved: Option<&SavedState>,
    ) -> ScreenOutcome {
        let span = info_span!("compose.activate", screen = %self.screen_id);
        let _enter = span.enter();

        if self.finished {
            debug!("screen finished, ignoring activation");
            return ScreenOutcome::Ignored;
        }

        let classified = match (saved, request) {
            (Some(saved), _) => {
                warn!(conversation = %saved.conversation, "restoring from saved state");
                Ok(ActivationRequest::restored(saved))
            }
            (None, Some(raw)) => classify(raw, &self.config),
            (None, None) => Err(ComposeError::UnrecognizedAction("<no request>".to_string())),
        };

        self.handle(classified)
    }

    /// Launch with a saved JSON bundle
    ///
    /// A bundle that fails to decode is ignored and the live request is used.
    pub fn activate_with_bundle(
        &mut self,
        request: Option<&RawRequest>,
        bundle: Option<&str>,
    ) -> ScreenOutcome {
        let saved = bundle.and_then(|json| match SavedState::from_json(json) {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable saved state");
                None
            }
        });

        self.activate(request, saved.as_ref())
    }

    /// Entry point for a request delivered while the screen is active
    ///
    /// The surface reloads when the request produced new arguments.
    pub fn on_request_redelivered(&mut self, request: &RawRequest) -> ScreenOutcome {
        let span = info_span!("compose.redeliver", screen = %self.screen_id);
        let _enter = span.enter();

        if self.finished {
            debug!("screen finished, ignoring redelivered request");
            return ScreenOutcome::Ignored;
        }

        let outcome = self.handle(classify(request, &self.config));
        if matches!(outcome, ScreenOutcome::Forwarded(_)) {
            self.surface.reload_from_arguments();
        }
        outcome
    }

    /// Entry point for a restored instance state
    pub fn on_restore_state(&mut self, saved: &SavedState) -> ScreenOutcome {
        let span = info_span!("compose.restore", screen = %self.screen_id);
        let _enter = span.enter();

        self.handle(Ok(ActivationRequest::restored(saved)))
    }

    /// Entry point for any sub-flow result
    ///
    /// Results for request codes other than the contact picker's are ignored.
    pub fn on_activity_result(
        &mut self,
        request_code: u32,
        result_code: i32,
        picked: Option<ContactRef>,
    ) -> ScreenOutcome {
        if request_code != self.config.contact_picker_request_code {
            warn!(request_code, "unknown request code");
            return ScreenOutcome::Ignored;
        }

        self.on_contact_pick_completed(PickResult::from_code(result_code), picked)
    }

    /// Entry point for the contact picker's completion
    pub fn on_contact_pick_completed(
        &mut self,
        result: PickResult,
        picked: Option<ContactRef>,
    ) -> ScreenOutcome {
        let span = info_span!("compose.pick", screen = %self.screen_id);
        let _enter = span.enter();

        if !self.share.is_awaiting_pick() {
            debug!("no contact pick pending, ignoring completion");
            return ScreenOutcome::Ignored;
        }

        let args = match self.pick_target(result, picked) {
            Ok(args) => args,
            Err(ComposeError::PickCancelled) => {
                info!("contact pick cancelled");
                self.share.abandon();
                return self.terminate(None);
            }
            Err(e) => {
                warn!(error = %e, "contact not usable");
                self.share.abandon();
                let notice = e
                    .is_user_visible()
                    .then(|| self.config.unregistered_notice.clone());
                return self.terminate(notice);
            }
        };

        self.share.contact_picked();
        if self.forward(args.clone()) {
            self.surface.reload_from_arguments();
        }
        let share = self.share.dispatch(self.kinds.as_ref(), &mut self.surface);

        ScreenOutcome::Dispatched { args, share }
    }

    /// State to persist before the screen may be destroyed
    ///
    /// `None` while no thread is open, e.g. composing to a new user.
    pub fn save_state(&self) -> Option<SavedState> {
        let _span = info_span!("compose.save", screen = %self.screen_id).entered();

        let saved = self
            .surface
            .current_thread_id()
            .map(|thread_id| SavedState::for_thread(&self.config, thread_id));
        debug!(saved = ?saved, "saving state");
        saved
    }

    /// [`save_state`](Self::save_state) encoded as a JSON bundle
    pub fn save_bundle(&self) -> ComposeResult<Option<String>> {
        self.save_state().map(|saved| saved.to_json()).transpose()
    }

    fn pick_target(
        &self,
        result: PickResult,
        picked: Option<ContactRef>,
    ) -> ComposeResult<NormalizedArguments> {
        let contact = match (result, picked) {
            (PickResult::Ok, Some(contact)) => contact,
            _ => return Err(ComposeError::PickCancelled),
        };

        info!(contact = %contact, "composing message for contact");
        compose_target_for_contact(&self.contacts, &self.conversations, &contact)
    }

    fn handle(&mut self, classified: ComposeResult<ActivationRequest>) -> ScreenOutcome {
        let request = match classified {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "request left inert");
                return ScreenOutcome::Inert;
            }
        };

        if let ActivationRequest::Share(payload) = request {
            let picker_open = self.share.is_awaiting_pick();
            if !self.share.begin(payload) {
                return ScreenOutcome::Ignored;
            }
            if !picker_open {
                self.host
                    .open_contact_picker(self.config.contact_picker_request_code);
            }
            return ScreenOutcome::AwaitingContactPick;
        }

        let Some(args) = request.arguments() else {
            return ScreenOutcome::Inert;
        };

        // A view request while a share waits for its contact wins over the share
        if self.share.abandon().is_some() {
            info!("view request replaced pending share");
        }

        if self.forward(args.clone()) {
            ScreenOutcome::Forwarded(args)
        } else {
            ScreenOutcome::Unchanged
        }
    }

    /// Hand arguments to the surface unless they are already showing
    fn forward(&mut self, args: NormalizedArguments) -> bool {
        if self.current.as_ref() == Some(&args) {
            debug!(args = %args, "arguments already forwarded");
            return false;
        }

        info!(args = %args, "loading conversation");
        self.surface.set_initial_arguments(args.clone());
        self.current = Some(args);
        true
    }

    fn terminate(&mut self, notice: Option<String>) -> ScreenOutcome {
        if let Some(message) = &notice {
            self.host.show_notice(message);
        }
        self.host.finish();
        self.finished = true;
        ScreenOutcome::Terminated { notice }
    }
}
