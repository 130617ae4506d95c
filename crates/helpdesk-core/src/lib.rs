//! Shared foundation for the helpdesk workspace: configuration and the
//! top-level error type used across crate boundaries.

pub mod config;
pub mod error;

pub use config::HelpdeskConfig;
pub use error::{HelpdeskError, Result};
