//! # Deskmate Providers
//!
//! `Responder` implementations for external language-model services.
//! All supported services speak the OpenAI chat-completions format and are
//! distinguished only by endpoint URL and whether they need an API key.

pub mod openai_compatible;

use deskmate_core::config::DeskmateConfig;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::traits::Responder;

use openai_compatible::OpenAiCompatibleResponder;

/// Create a responder from configuration.
///
/// Supported provider names: `openai`, `ollama`, and `custom:<base-url>`.
pub fn create_responder(config: &DeskmateConfig) -> Result<Box<dyn Responder>> {
    let provider_name = config.default_provider.as_str();

    match provider_name {
        "openai" => Ok(Box::new(OpenAiCompatibleResponder::openai(config))),
        "ollama" => Ok(Box::new(OpenAiCompatibleResponder::ollama(config))),
        other if other.starts_with("custom:") => {
            Ok(Box::new(OpenAiCompatibleResponder::custom(other, config)))
        }
        other => Err(DeskmateError::Config(format!(
            "Unknown provider: {other} (expected openai, ollama, or custom:<url>)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_providers_resolve() {
        let mut config = DeskmateConfig::default();
        for name in ["openai", "ollama", "custom:http://localhost:8080/v1"] {
            config.default_provider = name.into();
            assert!(create_responder(&config).is_ok(), "provider {name} failed");
        }
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = DeskmateConfig::default();
        config.default_provider = "palantir".into();
        assert!(create_responder(&config).is_err());
    }
}
