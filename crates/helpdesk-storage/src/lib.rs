//! SQLite-backed customer store.
//!
//! Provides the thread-safe [`Database`] wrapper, schema migrations, and the
//! [`CustomerRepository`] with the read operations the chat router relies on.

pub mod customers;
pub mod db;
pub mod migrations;

pub use customers::{CustomerField, CustomerRecord, CustomerRepository};
pub use db::Database;
