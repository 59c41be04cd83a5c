//! Custom tracing layers

use tracing::{Subscriber, span};
use tracing_subscriber::{
    layer::{Context, Layer},
    registry::LookupSpan,
};

use crate::context::{ScreenContextData, ScreenContextGuard};

/// Layer that attaches the active screen context to new spans
///
/// Spans opened while a [`ScreenContextGuard`] is alive keep the context in
/// their extensions, so later layers can read it even after the guard drops.
pub struct ScreenContextLayer;

impl ScreenContextLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScreenContextLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension data stored on spans
#[derive(Debug, Clone)]
pub struct ScreenContextExtension {
    pub data: ScreenContextData,
}

impl<S> Layer<S> for ScreenContextLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, _attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(screen_ctx) = ScreenContextGuard::current() {
                span.extensions_mut()
                    .insert(ScreenContextExtension { data: screen_ctx });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_screen_context_layer_creation() {
        let _layer = ScreenContextLayer::new();
    }

    #[test]
    fn test_screen_context_extension() {
        let id = Uuid::new_v4();
        let _guard = ScreenContextGuard::new(id, "share");

        let ctx = ScreenContextGuard::current().unwrap();
        let ext = ScreenContextExtension { data: ctx };
        assert_eq!(ext.data.screen_id, id);
        assert_eq!(ext.data.label, "share");
    }
}
