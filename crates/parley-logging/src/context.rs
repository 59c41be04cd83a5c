//! Screen context injection for logging
//!
//! Thread-local storage for the identity of the screen currently handling
//! events. Several screens can run in one process (the simulation runs one
//! per scenario), so spans carry the screen they were opened under.

use std::cell::RefCell;

use uuid::Uuid;

/// Screen context data stored in thread-local storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenContextData {
    /// Instance id of the screen
    pub screen_id: Uuid,
    /// Human-readable label (scenario or entry point)
    pub label: String,
}

thread_local! {
    static SCREEN_CONTEXT: RefCell<Option<ScreenContextData>> = const { RefCell::new(None) };
}

/// RAII guard for screen context
///
/// When this guard is created, it sets the screen context for the current
/// thread. When it's dropped, it restores the previous context (if any).
///
/// # Example
///
/// ```ignore
/// use parley_logging::context::ScreenContextGuard;
///
/// let _guard = ScreenContextGuard::new(screen.screen_id(), "share-text");
///
/// // Spans opened in this scope carry the screen context
/// tracing::info!("picking contact");
/// ```
pub struct ScreenContextGuard {
    previous: Option<ScreenContextData>,
}

impl ScreenContextGuard {
    /// Set the screen context for the current scope
    pub fn new(screen_id: Uuid, label: impl Into<String>) -> Self {
        let previous = SCREEN_CONTEXT.with(|ctx| ctx.borrow().clone());

        let new_ctx = ScreenContextData {
            screen_id,
            label: label.into(),
        };
        SCREEN_CONTEXT.with(|ctx| *ctx.borrow_mut() = Some(new_ctx));

        Self { previous }
    }

    /// Get the current screen context (if any)
    pub fn current() -> Option<ScreenContextData> {
        SCREEN_CONTEXT.with(|ctx| ctx.borrow().clone())
    }

    /// Get the current screen id (if set)
    pub fn current_screen_id() -> Option<Uuid> {
        Self::current().map(|ctx| ctx.screen_id)
    }
}

impl Drop for ScreenContextGuard {
    fn drop(&mut self) {
        SCREEN_CONTEXT.with(|ctx| *ctx.borrow_mut() = self.previous.take());
    }
}
