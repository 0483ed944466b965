//! # Deskmate Knowledge Base
//!
//! A small, curated set of question/answer/keyword records used when the AI
//! responder cannot answer. Loaded once at start-up, validated, then shared
//! read-only across all concurrent requests — there are no writers, so no
//! synchronization is needed.
//!
//! ## How it works
//! ```text
//! User: "how do i set a reminder"
//!   ↓
//! fuzzy match against each entry's question (bigram Dice score)
//!   ↓ best score > threshold?
//! entry.answer
//!   ↓ otherwise: keyword containment scan, first match wins
//! ```
//!
//! Entries can be extended from a TOML file of `[[entry]]` tables.

pub mod builtin;

use serde::Deserialize;

use deskmate_core::config::KnowledgeConfig;
use deskmate_core::error::{DeskmateError, Result};

/// Raw entry as written in configuration (TOML or the built-in set).
#[derive(Debug, Clone, Deserialize)]
pub struct EntrySpec {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A validated knowledge-base record.
///
/// `question` is only a fuzzy-match key and is never returned to the user;
/// `answer` is returned verbatim. Keywords are normalized to lowercase at
/// load so the per-request scan only lowercases the incoming message.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
    question_lower: String,
}

impl KnowledgeEntry {
    /// Lowercased question, precomputed at load time.
    pub fn question_lower(&self) -> &str {
        &self.question_lower
    }
}

/// The immutable, ordered collection of knowledge entries.
///
/// Iteration order is the load order; the selection stages rely on it for
/// stable tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    entry: Vec<EntrySpec>,
}

impl KnowledgeBase {
    /// Build a knowledge base from entry specs, rejecting any entry with an
    /// empty answer.
    pub fn load(specs: impl IntoIterator<Item = EntrySpec>) -> Result<Self> {
        let mut entries = Vec::new();
        for spec in specs {
            if spec.answer.trim().is_empty() {
                return Err(DeskmateError::Config(format!(
                    "Knowledge entry '{}' has an empty answer",
                    spec.question
                )));
            }
            let question_lower = spec.question.to_lowercase();
            entries.push(KnowledgeEntry {
                question: spec.question,
                answer: spec.answer,
                keywords: spec.keywords.iter().map(|k| k.to_lowercase()).collect(),
                question_lower,
            });
        }
        Ok(Self { entries })
    }

    /// The built-in office-assistant entry set.
    pub fn builtin() -> Self {
        Self::load(builtin::entries()).expect("built-in knowledge base is valid")
    }

    /// Parse entries from a TOML document of `[[entry]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: KnowledgeFile = toml::from_str(content).map_err(|e| {
            DeskmateError::Config(format!("Failed to parse knowledge file: {e}"))
        })?;
        Self::load(file.entry)
    }

    /// Assemble the knowledge base from configuration: the built-in entries
    /// plus, when `[knowledge] path` is set, the entries of that TOML file.
    /// Every consumer of the selector goes through this so the CLI and the
    /// gateway answer from the same base.
    pub fn from_config(config: &KnowledgeConfig) -> Result<Self> {
        let base = Self::builtin();
        if config.path.is_empty() {
            return Ok(base);
        }
        let extra = Self::load_from(std::path::Path::new(&config.path))?;
        Ok(base.merged(extra))
    }

    /// Load entries from a TOML file on disk.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DeskmateError::Config(format!(
                "Failed to read knowledge file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Append all entries of `other` after this base's entries.
    pub fn merged(mut self, other: KnowledgeBase) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// All entries, in stable load order.
    pub fn all(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
