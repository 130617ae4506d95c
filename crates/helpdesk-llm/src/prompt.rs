//! Prompt assembly: conversation turns and the wire-shape messages sent to
//! the model endpoint.

use serde::{Deserialize, Serialize};

/// Standing instructions sent as the first message of every delegated turn.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.\n\
You can answer about CRM, MongoDB, databases, programming, technology, sports, entertainment, science, and general topics only if the user specifically asks.\n\
For customer data, use only what the server provides - never guess or invent data.\n\
When listing items, always format as HTML <ul><li>...</li></ul> instead of markdown.";

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// A single message in the endpoint's chat format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub content: String,
}

/// The fully assembled message list for one model call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptPayload {
    pub messages: Vec<PromptMessage>,
}

/// Assemble system instructions, prior history, and the new user input into
/// an ordered message list.
pub fn format_prompt(system: &str, history: &[ChatTurn], input: &str) -> PromptPayload {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(PromptMessage {
        role: "system",
        content: system.to_string(),
    });
    for turn in history {
        messages.push(PromptMessage {
            role: turn.role.as_str(),
            content: turn.text.clone(),
        });
    }
    messages.push(PromptMessage {
        role: "user",
        content: input.to_string(),
    });
    PromptPayload { messages }
}
