//! The chat router: one message in, one reply out.
//!
//! Validates the message, locks the session for the whole turn, classifies
//! the normalized text, answers from the customer store where a rule fired,
//! and otherwise delegates to the language model with the session history.

use std::sync::Arc;

use tracing::{debug, warn};

use helpdesk_llm::{format_prompt, ChatTurn, LanguageModel, SYSTEM_PROMPT};
use helpdesk_storage::CustomerRepository;

use crate::error::ChatError;
use crate::format;
use crate::rules::{self, Intent};
use crate::session::{Session, SessionStore};

/// Orchestrates intent rules, the customer store, session memory, and the
/// model fallback.
pub struct ChatRouter {
    customers: CustomerRepository,
    model: Arc<dyn LanguageModel>,
    sessions: SessionStore,
    max_message_length: usize,
}

impl ChatRouter {
    pub fn new(
        customers: CustomerRepository,
        model: Arc<dyn LanguageModel>,
        max_message_length: usize,
    ) -> Self {
        Self {
            customers,
            model,
            sessions: SessionStore::new(),
            max_message_length,
        }
    }

    /// Number of sessions created so far.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Process one user message within a session and return the reply.
    ///
    /// The per-session lock is held for the whole turn, so concurrent
    /// requests with the same session id serialize; history always grows in
    /// user/assistant pairs.
    pub async fn handle_message(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<String, ChatError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if trimmed.len() > self.max_message_length {
            return Err(ChatError::MessageTooLong {
                max: self.max_message_length,
            });
        }

        let normalized = trimmed.to_lowercase();

        let session = self.sessions.get_or_create(session_id);
        let mut session = session.lock().await;

        session.history.push(ChatTurn::user(normalized.clone()));

        let intent = rules::classify(&normalized, &session.context);
        debug!(session_id, ?intent, "Message classified");

        let reply = self.dispatch(intent, &normalized, &mut session).await?;
        session.history.push(ChatTurn::assistant(reply.clone()));
        Ok(reply)
    }

    async fn dispatch(
        &self,
        intent: Intent,
        message: &str,
        session: &mut Session,
    ) -> Result<String, ChatError> {
        match intent {
            Intent::CustomerId(id) => {
                // The anchor moves even if the lookup misses, matching how a
                // follow-up like "phone" should target the id just asked about.
                session.context.last_customer_id = Some(id);
                match self.customers.find_by_id(id) {
                    Ok(Some(record)) => {
                        session.context.last_customer_name = Some(record.name.clone());
                        Ok(format::format_customer(&record))
                    }
                    Ok(None) => Ok(format::customer_not_found(id)),
                    Err(e) => {
                        warn!(error = %e, id, "Customer lookup failed");
                        Ok(format::customer_not_found(id))
                    }
                }
            }

            Intent::NextCustomer(after) => match self.customers.find_next_after(after) {
                Ok(Some(record)) => {
                    session.context.last_customer_id = Some(record.id);
                    session.context.last_customer_name = Some(record.name.clone());
                    Ok(format::format_customer(&record))
                }
                Ok(None) => Ok(format::no_next_customer()),
                Err(e) => {
                    warn!(error = %e, after, "Next-customer lookup failed");
                    Ok(format::no_next_customer())
                }
            },

            Intent::NameLookup(name) => {
                session.context.last_customer_name = Some(name.clone());
                match self.customers.find_by_name_contains(&name) {
                    Ok(Some(record)) => {
                        session.context.last_customer_id = Some(record.id);
                        Ok(format::format_customer(&record))
                    }
                    Ok(None) => Ok(format::name_not_found(&name)),
                    Err(e) => {
                        warn!(error = %e, name, "Name lookup failed");
                        Ok(format::name_not_found(&name))
                    }
                }
            }

            Intent::FieldLookup(field, id) => match self.customers.find_field_by_id(id, field) {
                Ok(Some(value)) => Ok(format::format_field(field, id, value.as_deref())),
                Ok(None) => Ok(format::field_not_found(field)),
                Err(e) => {
                    warn!(error = %e, id, field = field.column(), "Field lookup failed");
                    Ok(format::field_not_found(field))
                }
            },

            Intent::LastCustomer(id) => match self.customers.find_by_id(id) {
                Ok(Some(record)) => {
                    session.context.last_customer_name = Some(record.name.clone());
                    Ok(format::format_customer(&record))
                }
                Ok(None) => Ok(format::last_customer_missing()),
                Err(e) => {
                    warn!(error = %e, id, "Last-customer lookup failed");
                    Ok(format::last_customer_missing())
                }
            },

            Intent::Greeting => Ok(format::greeting_reply(message).to_string()),

            Intent::KnownTopic | Intent::Fallback => self.delegate(message, session).await,
        }
    }

    /// Hand the message and prior history to the language model.
    async fn delegate(&self, message: &str, session: &Session) -> Result<String, ChatError> {
        // The current user turn was already appended; everything before it
        // is the history the model sees.
        let history = &session.history[..session.history.len().saturating_sub(1)];
        let payload = format_prompt(SYSTEM_PROMPT, history, message);
        let content = self
            .model
            .invoke(&payload)
            .await
            .map_err(|e| ChatError::Model(e.to_string()))?;
        Ok(format::delegated(&content))
    }
}
