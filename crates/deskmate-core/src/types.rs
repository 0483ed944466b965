//! Conversation and reply types shared across crates.

use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn of the conversation, owned by the caller and forwarded
/// read-only to the AI responder. The local fallback stages ignore history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Which selection stage produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// The external AI responder answered.
    Ai,
    /// Fuzzy match against a knowledge-base question.
    KbFuzzy,
    /// Keyword containment match against a knowledge-base entry.
    KbKeyword,
    /// One of the built-in intent rules.
    Heuristic,
    /// The generic catch-all response.
    Default,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Ai => "ai",
            Provenance::KbFuzzy => "kb-fuzzy",
            Provenance::KbKeyword => "kb-keyword",
            Provenance::Heuristic => "heuristic",
            Provenance::Default => "default",
        }
    }
}

/// The final answer handed back to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub provenance: Provenance,
}

impl Reply {
    pub fn new(text: impl Into<String>, provenance: Provenance) -> Self {
        Self { text: text.into(), provenance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_serializes_kebab_case() {
        let json = serde_json::to_string(&Provenance::KbFuzzy).unwrap();
        assert_eq!(json, "\"kb-fuzzy\"");
        assert_eq!(Provenance::KbKeyword.as_str(), "kb-keyword");
    }

    #[test]
    fn test_turn_roundtrip() {
        let turn = ConversationTurn::user("hello");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        let back: ConversationTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, Role::User);
        assert_eq!(back.content, "hello");
    }
}
