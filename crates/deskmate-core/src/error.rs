//! Error taxonomy for Deskmate.
//!
//! Only `Config` can surface from the response selector itself (a knowledge
//! base that failed validation at load). Provider-side errors exist so that
//! responder implementations can report failures to the selector, which
//! absorbs them and falls through to the local stages.

use thiserror::Error;

/// All errors produced by Deskmate crates.
#[derive(Debug, Error)]
pub enum DeskmateError {
    /// Load-time configuration or validation failure. Fatal at start-up.
    #[error("Config error: {0}")]
    Config(String),

    /// An AI responder call failed (HTTP error, bad payload, quota, ...).
    #[error("Provider error: {0}")]
    Provider(String),

    /// Transport-level HTTP failure when calling a responder.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The selected provider requires an API key and none was configured.
    #[error("API key missing for provider: {0}")]
    ApiKeyMissing(String),
}

pub type Result<T> = std::result::Result<T, DeskmateError>;
