//! Unified OpenAI-compatible responder.
//!
//! One struct covers every OpenAI-compatible chat-completions API; providers
//! differ only in base URL and whether a key is required. The request is
//! non-streaming: the selector wants one final string or an error.

use async_trait::async_trait;
use serde_json::{Value, json};

use deskmate_core::config::DeskmateConfig;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::traits::Responder;
use deskmate_core::types::{ConversationTurn, Role};

/// A responder that works with any OpenAI-compatible API.
pub struct OpenAiCompatibleResponder {
    name: String,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    /// Whether this endpoint works without an API key (local servers).
    key_optional: bool,
    client: reqwest::Client,
}

impl OpenAiCompatibleResponder {
    /// OpenAI cloud API. Key resolution: config > `OPENAI_API_KEY` env var.
    pub fn openai(config: &DeskmateConfig) -> Self {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        };
        Self::build("openai", "https://api.openai.com/v1", api_key, false, config)
    }

    /// Local Ollama server (`OLLAMA_HOST` env override). No key required.
    pub fn ollama(config: &DeskmateConfig) -> Self {
        let host =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost:11434".into());
        let base_url = format!("{}/v1", host.trim_end_matches('/').trim_end_matches("/v1"));
        Self::build("ollama", &base_url, String::new(), true, config)
    }

    /// Custom endpoint, written as `custom:https://my-server.com/v1`.
    pub fn custom(endpoint: &str, config: &DeskmateConfig) -> Self {
        let base_url = endpoint
            .strip_prefix("custom:")
            .unwrap_or(endpoint)
            .trim_end_matches('/')
            .to_string();
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("CUSTOM_API_KEY").unwrap_or_default()
        };
        Self::build("custom", &base_url, api_key, true, config)
    }

    fn build(
        name: &str,
        base_url: &str,
        api_key: String,
        key_optional: bool,
        config: &DeskmateConfig,
    ) -> Self {
        Self {
            name: name.to_string(),
            api_key,
            base_url: base_url.to_string(),
            model: config.default_model.clone(),
            temperature: config.default_temperature,
            max_tokens: config.responder.max_tokens,
            key_optional,
            client: reqwest::Client::new(),
        }
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            req
        } else {
            req.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }
}

#[async_trait]
impl Responder for OpenAiCompatibleResponder {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        self.key_optional || !self.api_key.is_empty()
    }

    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String> {
        if !self.is_configured() {
            return Err(DeskmateError::ApiKeyMissing(self.name.clone()));
        }

        // Standard OpenAI message list: system prompt, prior turns, message
        let mut messages = vec![json!({"role": "system", "content": system_prompt})];
        for turn in history {
            let role = match turn.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            messages.push(json!({"role": role, "content": turn.content}));
        }
        messages.push(json!({"role": "user", "content": message}));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            "Completion request: provider={}, model={}, history={} turn(s)",
            self.name,
            self.model,
            history.len()
        );
        let req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        let req = self.apply_auth(req);

        let resp = req.send().await.map_err(|e| {
            DeskmateError::Http(format!("{} connection failed ({}): {}", self.name, url, e))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DeskmateError::Provider(format!(
                "{} API error {}: {}",
                self.name, status, text
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| DeskmateError::Http(e.to_string()))?;

        let content = body["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| DeskmateError::Provider("No choices in response".into()))?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DeskmateConfig {
        DeskmateConfig::default()
    }

    #[test]
    fn test_openai_unconfigured_without_key() {
        let mut cfg = config();
        cfg.api_key = String::new();
        // Only meaningful when the env var is absent in the test environment
        if std::env::var("OPENAI_API_KEY").is_err() {
            let responder = OpenAiCompatibleResponder::openai(&cfg);
            assert!(!responder.is_configured());
        }
    }

    #[test]
    fn test_openai_configured_with_key() {
        let mut cfg = config();
        cfg.api_key = "sk-test".into();
        let responder = OpenAiCompatibleResponder::openai(&cfg);
        assert!(responder.is_configured());
        assert_eq!(responder.name(), "openai");
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let responder = OpenAiCompatibleResponder::ollama(&config());
        assert!(responder.is_configured());
        assert!(responder.base_url.ends_with("/v1"));
    }

    #[test]
    fn test_custom_endpoint_parsing() {
        let responder =
            OpenAiCompatibleResponder::custom("custom:https://my-server.com/v1/", &config());
        assert_eq!(responder.base_url, "https://my-server.com/v1");
        assert!(responder.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_complete_errors() {
        let mut cfg = config();
        cfg.api_key = String::new();
        if std::env::var("OPENAI_API_KEY").is_err() {
            let responder = OpenAiCompatibleResponder::openai(&cfg);
            let result = responder.complete("prompt", &[], "hello").await;
            assert!(matches!(result, Err(DeskmateError::ApiKeyMissing(_))));
        }
    }
}
