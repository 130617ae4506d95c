//! Application state shared across all route handlers.
//!
//! AppState holds references to the chat router and the customer store.
//! It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use helpdesk_chat::ChatRouter;
use helpdesk_storage::CustomerRepository;

/// Shared application state.
///
/// All fields are cheap to clone across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// The chat pipeline (rules, sessions, model fallback).
    pub chat: Arc<ChatRouter>,
    /// Read access to the customer store, for the health check.
    pub customers: CustomerRepository,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(chat: ChatRouter, customers: CustomerRepository) -> Self {
        Self {
            chat: Arc::new(chat),
            customers,
            start_time: Instant::now(),
        }
    }
}
