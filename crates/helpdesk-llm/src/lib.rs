//! Language-model delegation for the chat fallback path.
//!
//! The router hands messages it cannot answer from the customer store to a
//! [`LanguageModel`]. The production implementation is [`OllamaClient`];
//! tests use [`MockModel`].

pub mod mock;
pub mod ollama;
pub mod prompt;

pub use mock::MockModel;
pub use ollama::OllamaClient;
pub use prompt::{format_prompt, ChatTurn, PromptPayload, Role, SYSTEM_PROMPT};

use async_trait::async_trait;

use helpdesk_core::error::HelpdeskError;

/// A chat-completion backend.
///
/// Implementations must be cheap to share behind an `Arc` across handler
/// tasks.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a formatted prompt and return the assistant's reply text.
    async fn invoke(&self, payload: &PromptPayload) -> Result<String, HelpdeskError>;
}
