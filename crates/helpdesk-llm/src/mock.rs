//! Deterministic model stub for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use helpdesk_core::error::HelpdeskError;

use crate::prompt::PromptPayload;
use crate::LanguageModel;

/// A [`LanguageModel`] that returns a fixed reply and records every call.
///
/// `MockModel::failing()` builds a variant whose `invoke` always errors,
/// for exercising the 500 path end to end.
pub struct MockModel {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl MockModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Number of times `invoke` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Content of the final user message of the most recent call.
    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn invoke(&self, payload: &PromptPayload) -> Result<String, HelpdeskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_input.lock() {
            *guard = payload.messages.last().map(|m| m.content.clone());
        }
        if self.fail {
            return Err(HelpdeskError::Model("mock model failure".to_string()));
        }
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_prompt;

    #[tokio::test]
    async fn test_mock_returns_fixed_reply() {
        let model = MockModel::new("canned answer");
        let payload = format_prompt("sys", &[], "question");
        let reply = model.invoke(&payload).await.unwrap();
        assert_eq!(reply, "canned answer");
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.last_input().as_deref(), Some("question"));
    }

    #[tokio::test]
    async fn test_failing_mock_errors() {
        let model = MockModel::failing();
        let payload = format_prompt("sys", &[], "question");
        let err = model.invoke(&payload).await.unwrap_err();
        assert!(matches!(err, HelpdeskError::Model(_)));
        assert_eq!(model.call_count(), 1);
    }
}
