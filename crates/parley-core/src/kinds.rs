//! Default message kind registry
//!
//! Mirrors the message kinds the service can carry: plain text, and a fixed
//! set of image formats. Matching ignores case and MIME parameters, so
//! `Text/Plain; charset=utf-8` counts as plain text.

use std::collections::HashSet;

use crate::traits::MessageKindRegistry;

/// MIME types sent as plain text messages
pub const PLAIN_TEXT_MIME_TYPES: &[&str] = &["text/plain"];

/// MIME types sent as image messages
pub const IMAGE_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif"];

/// Strip parameters and lowercase a MIME type
pub fn essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Registry backed by fixed MIME type sets
#[derive(Debug, Clone)]
pub struct DefaultMessageKinds {
    plain_text: HashSet<String>,
    images: HashSet<String>,
}

impl DefaultMessageKinds {
    /// Registry with the built-in text and image types
    pub fn new() -> Self {
        Self {
            plain_text: PLAIN_TEXT_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
            images: IMAGE_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Accept an additional image type
    pub fn with_image_type(mut self, mime: &str) -> Self {
        self.images.insert(essence(mime));
        self
    }

    /// Accept an additional plain text type
    pub fn with_plain_text_type(mut self, mime: &str) -> Self {
        self.plain_text.insert(essence(mime));
        self
    }
}

impl Default for DefaultMessageKinds {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageKindRegistry for DefaultMessageKinds {
    fn supports_plain_text(&self, mime: &str) -> bool {
        self.plain_text.contains(&essence(mime))
    }

    fn supports_image(&self, mime: &str) -> bool {
        self.images.contains(&essence(mime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_kinds() {
        let kinds = DefaultMessageKinds::new();
        assert!(kinds.supports_plain_text("text/plain"));
        assert!(!kinds.supports_image("text/plain"));

        assert!(kinds.supports_image("image/jpeg"));
        assert!(kinds.supports_image("image/png"));
        assert!(!kinds.supports_plain_text("image/jpeg"));

        assert!(!kinds.supports_plain_text("application/pdf"));
        assert!(!kinds.supports_image("application/pdf"));
    }

    #[test]
    fn test_parameters_and_case_ignored() {
        let kinds = DefaultMessageKinds::new();
        assert!(kinds.supports_plain_text("Text/Plain; charset=utf-8"));
        assert!(kinds.supports_image("IMAGE/GIF"));
    }

    #[test]
    fn test_extra_types() {
        let kinds = DefaultMessageKinds::new()
            .with_image_type("image/webp")
            .with_plain_text_type("text/markdown");
        assert!(kinds.supports_image("image/webp"));
        assert!(kinds.supports_plain_text("text/markdown"));
    }

    #[test]
    fn test_essence() {
        assert_eq!(essence(" text/HTML ; q=1"), "text/html");
        assert_eq!(essence(""), "");
    }
}
