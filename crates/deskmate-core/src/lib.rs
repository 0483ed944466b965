//! # Deskmate Core
//!
//! Shared foundation for the Deskmate office assistant: configuration,
//! the error taxonomy, conversation types, and the `Responder` trait that
//! external language-model providers implement.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::DeskmateConfig;
pub use error::{DeskmateError, Result};
pub use traits::Responder;
pub use types::{ConversationTurn, Provenance, Reply, Role};
