//! Copy-to-clipboard decision logic
//!
//! The async clipboard is preferred; when it is missing or rejects the write,
//! the legacy hidden-textarea copy is tried instead. Failures are reported
//! back to the caller for logging and never reach the user.

/// Milliseconds the "Copied!" label stays on a copy button
pub const COPY_FEEDBACK_MS: u32 = 2000;

/// Button markup shown while the copy confirmation is visible
pub const COPIED_BUTTON_HTML: &str = r#"<i class="fas fa-check"></i><span>Copied!</span>"#;

/// Class added to a copy button while the confirmation is visible
pub const COPY_SUCCESS_CLASS: &str = "copy-btn--success";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard is not available")]
    Unavailable,

    #[error("Clipboard write rejected: {0}")]
    Rejected(String),

    #[error("Copy command failed: {0}")]
    CommandFailed(String),
}

/// Platform clipboard capabilities
#[allow(async_fn_in_trait)]
pub trait ClipboardBackend {
    /// Whether the async clipboard capability exists at all
    fn has_async_clipboard(&self) -> bool;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Hidden-textarea select and copy
    fn fallback_copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Which path ended up copying the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Clipboard,
    Fallback,
}

/// Result of a copy attempt, with every failure seen along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub method: Option<CopyMethod>,
    pub errors: Vec<ClipboardError>,
}

impl CopyReport {
    /// Whether the button should flash its confirmation
    pub fn copied(&self) -> bool {
        self.method.is_some()
    }
}

/// Copy `text`, falling back to the legacy path when needed
pub async fn copy_with_fallback<B: ClipboardBackend>(backend: &B, text: &str) -> CopyReport {
    let mut errors = Vec::new();

    if backend.has_async_clipboard() {
        match backend.write_text(text).await {
            Ok(()) => {
                return CopyReport {
                    method: Some(CopyMethod::Clipboard),
                    errors,
                };
            }
            Err(err) => errors.push(err),
        }
    }

    let method = match backend.fallback_copy(text) {
        Ok(()) => Some(CopyMethod::Fallback),
        Err(err) => {
            errors.push(err);
            None
        }
    };

    CopyReport { method, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockClipboard {
        async_available: bool,
        reject_write: bool,
        fallback_fails: bool,
        written: RefCell<Vec<String>>,
        fallback_copied: RefCell<Vec<String>>,
    }

    impl ClipboardBackend for MockClipboard {
        fn has_async_clipboard(&self) -> bool {
            self.async_available
        }

        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.reject_write {
                return Err(ClipboardError::Rejected("NotAllowedError".to_string()));
            }
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn fallback_copy(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fallback_fails {
                return Err(ClipboardError::CommandFailed("execCommand returned false".to_string()));
            }
            self.fallback_copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_async_clipboard_used_when_available() {
        let backend = MockClipboard {
            async_available: true,
            ..Default::default()
        };

        let report = copy_with_fallback(&backend, "SELECT 1").await;

        assert_eq!(report.method, Some(CopyMethod::Clipboard));
        assert!(report.errors.is_empty());
        assert_eq!(backend.written.borrow().as_slice(), ["SELECT 1"]);
        assert!(backend.fallback_copied.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_write_falls_back() {
        let backend = MockClipboard {
            async_available: true,
            reject_write: true,
            ..Default::default()
        };

        let report = copy_with_fallback(&backend, "SELECT id FROM t").await;

        assert!(report.copied());
        assert_eq!(report.method, Some(CopyMethod::Fallback));
        assert!(matches!(report.errors.as_slice(), [ClipboardError::Rejected(_)]));
        assert_eq!(backend.fallback_copied.borrow().as_slice(), ["SELECT id FROM t"]);
    }

    #[tokio::test]
    async fn test_missing_clipboard_goes_straight_to_fallback() {
        let backend = MockClipboard::default();

        let report = copy_with_fallback(&backend, "x").await;

        assert_eq!(report.method, Some(CopyMethod::Fallback));
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_both_paths_failing_is_not_copied() {
        let backend = MockClipboard {
            async_available: true,
            reject_write: true,
            fallback_fails: true,
            ..Default::default()
        };

        let report = copy_with_fallback(&backend, "x").await;

        assert!(!report.copied());
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_feedback_markup() {
        assert!(COPIED_BUTTON_HTML.contains("Copied!"));
        assert_eq!(COPY_FEEDBACK_MS, 2000);
    }
}
