//! Chat subsystem errors.

use thiserror::Error;

use helpdesk_core::error::HelpdeskError;

/// Errors surfaced by [`crate::ChatRouter::handle_message`].
///
/// Validation failures map to 400 at the HTTP layer; model and storage
/// failures map to 500. Store lookup failures inside a routed turn are
/// masked as apology replies instead and never reach this type.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message too long (max {max} characters)")]
    MessageTooLong { max: usize },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<HelpdeskError> for ChatError {
    fn from(err: HelpdeskError) -> Self {
        match err {
            HelpdeskError::Model(msg) => ChatError::Model(msg),
            HelpdeskError::Storage(msg) => ChatError::Storage(msg),
            other => ChatError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ChatError::EmptyMessage.to_string(),
            "Message cannot be empty"
        );
        assert_eq!(
            ChatError::MessageTooLong { max: 2000 }.to_string(),
            "Message too long (max 2000 characters)"
        );
        assert_eq!(
            ChatError::Model("timeout".into()).to_string(),
            "Model error: timeout"
        );
    }

    #[test]
    fn test_from_helpdesk_error() {
        let err: ChatError = HelpdeskError::Model("down".into()).into();
        assert!(matches!(err, ChatError::Model(_)));

        let err: ChatError = HelpdeskError::Storage("locked".into()).into();
        assert!(matches!(err, ChatError::Storage(_)));

        let err: ChatError = HelpdeskError::Config("oops".into()).into();
        assert!(matches!(err, ChatError::Storage(_)));
    }
}
