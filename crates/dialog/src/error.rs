use html::TagError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    /// `begin_body` while a capture scope is already open.
    #[error("body capture is already open; capture scopes cannot be nested")]
    NestedCapture,
    /// Body written or closed without an open capture scope.
    #[error("no body capture is open")]
    CaptureNotOpen,
    #[error("cannot render dialog markup: {0}")]
    Markup(#[from] TagError),
}
