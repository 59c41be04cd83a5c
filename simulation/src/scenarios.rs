//! Pre-defined compose screen scenarios
//!
//! Each scenario plays one path through the screen in the same small world:
//! alice (`contact/alice`, user `u7`) already has thread 7, bob
//! (`contact/bob`, user `u1`) has no thread, and `contact/stranger` is not
//! registered.

use parley_compose::{ComposeConfig, RESULT_CANCELED, RESULT_OK, RawRequest};
use parley_core::{ConversationUri, ThreadId, UserId};
use tracing::info;

use crate::script::{Report, Script, ScriptEvent, run_script};

/// Names accepted by [`run_scenario`]
pub const SCENARIOS: &[&str] = &[
    "launch",
    "restore",
    "redeliver",
    "share-text",
    "share-image",
    "share-unsupported",
    "cancel",
    "unregistered",
];

fn world() -> Script {
    Script::default()
        .with_contact("contact/alice", "u7")
        .with_contact("contact/bob", "u1")
        .with_conversation("u7", 7)
}

fn activate(request: RawRequest) -> ScriptEvent {
    ScriptEvent::Activate {
        request: Some(request),
        saved: None,
    }
}

fn pick(config: &ComposeConfig, result_code: i32, contact: Option<&str>) -> ScriptEvent {
    ScriptEvent::Pick {
        request_code: config.contact_picker_request_code,
        result_code,
        contact: contact.map(str::to_string),
    }
}

/// Build the script for a named scenario
pub fn scenario(name: &str, config: &ComposeConfig) -> Option<Script> {
    let script = match name {
        "launch" => world()
            .event(activate(RawRequest::view_conversation(config, ThreadId::new(7))))
            .event(activate(RawRequest::view_conversation(config, ThreadId::new(7)))),
        "restore" => world()
            .event(ScriptEvent::Activate {
                request: None,
                saved: Some(ConversationUri::for_thread(
                    &config.conversations_base,
                    ThreadId::new(42),
                )),
            })
            .event(ScriptEvent::SaveRestore),
        "redeliver" => world()
            .event(activate(RawRequest::view_user(config, &UserId::new("u1"))))
            .event(ScriptEvent::Redeliver {
                request: RawRequest::view_conversation(config, ThreadId::new(7)),
            }),
        "share-text" => world()
            .event(activate(RawRequest::share_text(config, "text/plain", "hello")))
            .event(pick(config, RESULT_OK, Some("contact/alice"))),
        "share-image" => world()
            .event(activate(RawRequest::share_stream(
                config,
                "image/jpeg",
                "content://media/external/images/1",
            )))
            .event(pick(config, RESULT_OK, Some("contact/bob")))
            .event(pick(config, RESULT_OK, Some("contact/bob"))),
        "share-unsupported" => world()
            .event(activate(RawRequest::share_stream(
                config,
                "application/pdf",
                "content://downloads/1",
            )))
            .event(pick(config, RESULT_OK, Some("contact/alice"))),
        "cancel" => world()
            .event(activate(RawRequest::share_text(config, "text/plain", "hello")))
            .event(pick(config, RESULT_CANCELED, None)),
        "unregistered" => world()
            .event(activate(RawRequest::share_text(config, "text/plain", "hello")))
            .event(pick(config, RESULT_OK, Some("contact/stranger"))),
        _ => return None,
    };
    Some(script)
}

/// Run a named scenario
pub fn run_scenario(name: &str, config: &ComposeConfig) -> Option<Report> {
    let script = scenario(name, config)?;
    info!(scenario = name, "=== Running scenario ===");
    Some(run_script(name, &script, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_compose::{DispatchOutcome, ScreenOutcome};

    fn run(name: &str) -> Report {
        run_scenario(name, &ComposeConfig::default()).unwrap()
    }

    #[test]
    fn test_all_scenarios_known() {
        for name in SCENARIOS {
            assert!(scenario(name, &ComposeConfig::default()).is_some(), "{}", name);
        }
        assert!(scenario("nope", &ComposeConfig::default()).is_none());
    }

    #[test]
    fn test_launch_forwards_once() {
        let report = run("launch");
        assert_eq!(report.outcomes[1], ScreenOutcome::Unchanged);
        assert_eq!(report.surface.forwarded().len(), 1);
    }

    #[test]
    fn test_restore_round_trip() {
        let report = run("restore");
        assert!(matches!(report.outcomes[0], ScreenOutcome::Forwarded(_)));
        assert_eq!(report.outcomes[1], ScreenOutcome::Unchanged);
    }

    #[test]
    fn test_redeliver_reloads() {
        let report = run("redeliver");
        assert_eq!(report.surface.reload_count(), 1);
    }

    #[test]
    fn test_share_image_sent_once() {
        let report = run("share-image");
        assert!(matches!(
            report.outcomes[1],
            ScreenOutcome::Dispatched {
                share: DispatchOutcome::ImageSent,
                ..
            }
        ));
        assert_eq!(report.outcomes[2], ScreenOutcome::Ignored);
        assert_eq!(report.surface.sent_images().len(), 1);
    }

    #[test]
    fn test_unregistered_notice() {
        let report = run("unregistered");
        assert_eq!(report.host.notices().len(), 1);
        assert!(report.host.finished());
    }

    #[test]
    fn test_cancel_finishes_quietly() {
        let report = run("cancel");
        assert!(report.host.notices().is_empty());
        assert!(report.host.finished());
        assert!(report.surface.calls().is_empty());
    }
}
