//! Conversation types: operating modes and prior turns

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-selected operating profile.
///
/// Controls model choice, the history window and whether speech is attempted.
/// Anything other than `basic` or `research` (including no mode at all)
/// is treated as `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fast, short answers; the only mode that attempts speech synthesis
    Basic,
    /// Deep research answers (or diagrams when asked for a flow)
    Research,
    /// Model choice follows the classified content of the message
    #[default]
    Auto,
}

impl Mode {
    /// Resolve the mode field of a request. Matching is exact: any other
    /// spelling, including a different case, means auto.
    pub fn from_request(mode: Option<&str>) -> Self {
        match mode {
            Some("basic") => Mode::Basic,
            Some("research") => Mode::Research,
            _ => Mode::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Basic => "basic",
            Mode::Research => "research",
            Mode::Auto => "auto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prior exchange supplied by the client, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user: String,
    pub ai: String,
}

impl ConversationTurn {
    pub fn new(user: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ai: ai.into(),
        }
    }

    /// Read a turn from a raw history entry.
    ///
    /// Returns `None` for entries that are not objects or lack either the
    /// `user` or the `ai` key. Non-string values are stringified.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let entry = value.as_object()?;
        let user = entry.get("user")?;
        let ai = entry.get("ai")?;
        Some(Self {
            user: stringify(user),
            ai: stringify(ai),
        })
    }
}

fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_from_request() {
        assert_eq!(Mode::from_request(Some("basic")), Mode::Basic);
        assert_eq!(Mode::from_request(Some("research")), Mode::Research);
        assert_eq!(Mode::from_request(Some("Research")), Mode::Auto);
        assert_eq!(Mode::from_request(Some(" basic")), Mode::Auto);
        assert_eq!(Mode::from_request(Some("auto")), Mode::Auto);
        assert_eq!(Mode::from_request(Some("turbo")), Mode::Auto);
        assert_eq!(Mode::from_request(None), Mode::Auto);
    }

    #[test]
    fn test_turn_from_value() {
        let turn = ConversationTurn::from_value(&json!({"user": "hi", "ai": "hello"}));
        assert_eq!(turn, Some(ConversationTurn::new("hi", "hello")));

        let numeric = ConversationTurn::from_value(&json!({"user": 42, "ai": true}));
        assert_eq!(numeric, Some(ConversationTurn::new("42", "true")));
    }

    #[test]
    fn test_malformed_entries_rejected() {
        assert!(ConversationTurn::from_value(&json!({"user": "only user"})).is_none());
        assert!(ConversationTurn::from_value(&json!({"ai": "only ai"})).is_none());
        assert!(ConversationTurn::from_value(&json!("plain string")).is_none());
        assert!(ConversationTurn::from_value(&json!(["user", "ai"])).is_none());
    }
}
