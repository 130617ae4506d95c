//! Conversational CRM assistant core.
//!
//! Classifies each user message against an ordered rule list, answers
//! customer questions from the store, and delegates everything else to the
//! language model. Per-session memory lets short follow-ups like "phone"
//! resolve against the most recently mentioned customer.

pub mod error;
pub mod format;
pub mod router;
pub mod rules;
pub mod session;

pub use error::ChatError;
pub use router::ChatRouter;
pub use rules::Intent;
pub use session::{CustomerContext, Session, SessionStore};
