//! Deskmate configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskmateConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub responder: ResponderConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

fn default_api_key() -> String { String::new() }
fn default_provider() -> String { "openai".into() }
fn default_model() -> String { "gpt-3.5-turbo".into() }
fn default_temperature() -> f32 { 0.7 }

impl Default for DeskmateConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            gateway: GatewayConfig::default(),
            responder: ResponderConfig::default(),
            knowledge: KnowledgeConfig::default(),
        }
    }
}

impl DeskmateConfig {
    /// Load config from the default path (~/.deskmate/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::DeskmateError::Config(format!("Failed to read config: {e}"))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            crate::error::DeskmateError::Config(format!("Failed to parse config: {e}"))
        })?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".deskmate")
            .join("config.toml")
    }
}

/// Gateway (HTTP/WebSocket server) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { port: default_port(), host: default_host() }
    }
}

/// Response selection configuration.
///
/// The threshold and AI timeout are tunable but default to the values the
/// selection behavior was designed around; changing them changes which
/// stage answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderConfig {
    /// Minimum fuzzy-match score (exclusive) for a knowledge-base answer.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Upper bound on the external AI call; a timeout falls through to the
    /// knowledge base.
    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,
    /// Max completion tokens requested from the AI responder.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// System prompt forwarded to the AI responder.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_similarity_threshold() -> f64 { 0.5 }
fn default_ai_timeout_secs() -> u64 { 20 }
fn default_max_tokens() -> u32 { 150 }
fn default_system_prompt() -> String {
    "You are a helpful office assistant chatbot. You can help with:\n\
     - Scheduling meetings and appointments\n\
     - Setting reminders and deadlines\n\
     - Managing to-do lists\n\
     - Providing daily briefings\n\
     - Answering general office questions\n\n\
     Keep responses concise and professional. When users ask to schedule \
     something or set reminders, ask for specific details like date, time, \
     and description."
        .into()
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            ai_timeout_secs: default_ai_timeout_secs(),
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// Knowledge-base configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KnowledgeConfig {
    /// Optional TOML file with extra `[[entry]]` records appended after the
    /// built-in set.
    #[serde(default)]
    pub path: String,
}
