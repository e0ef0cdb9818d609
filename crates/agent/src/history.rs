//! History windowing
//!
//! Clients send their whole transcript with every request. Only the most
//! recent entries are replayed to the model: 3 in basic mode, 6 otherwise.
//! The window is taken over the raw entries first, so malformed entries
//! still count against it and are dropped afterwards.

use eco_assistant_core::{ConversationTurn, Mode};
use serde_json::Value;

const BASIC_WINDOW: usize = 3;
const EXTENDED_WINDOW: usize = 6;

pub fn window_size(mode: Mode) -> usize {
    match mode {
        Mode::Basic => BASIC_WINDOW,
        Mode::Research | Mode::Auto => EXTENDED_WINDOW,
    }
}

/// The last `window_size(mode)` raw entries, in their original order
pub fn window(history: &[Value], mode: Mode) -> &[Value] {
    let size = window_size(mode);
    &history[history.len().saturating_sub(size)..]
}

/// Well-formed turns inside the window
pub fn recent_turns(history: &[Value], mode: Mode) -> Vec<ConversationTurn> {
    let raw = window(history, mode);
    let turns: Vec<ConversationTurn> = raw.iter().filter_map(ConversationTurn::from_value).collect();

    if turns.len() < raw.len() {
        tracing::debug!(
            skipped = raw.len() - turns.len(),
            "Skipped malformed history entries"
        );
    }
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!({"user": format!("q{}", i), "ai": format!("a{}", i)}))
            .collect()
    }

    #[test]
    fn test_basic_keeps_last_three() {
        let h = history(5);
        let turns = recent_turns(&h, Mode::Basic);
        let users: Vec<&str> = turns.iter().map(|t| t.user.as_str()).collect();
        assert_eq!(users, vec!["q2", "q3", "q4"]);
    }

    #[test]
    fn test_research_and_auto_keep_six() {
        let h = history(10);
        assert_eq!(window(&h, Mode::Research).len(), 6);
        assert_eq!(window(&h, Mode::Auto)[0]["user"], "q4");
    }

    #[test]
    fn test_short_history_untouched() {
        let h = history(2);
        assert_eq!(window(&h, Mode::Basic), h.as_slice());
        assert!(window(&[], Mode::Research).is_empty());
    }

    #[test]
    fn test_malformed_entries_count_then_drop() {
        let h = vec![
            json!({"user": "old", "ai": "old"}),
            json!("just a string"),
            json!({"user": "no reply"}),
            json!({"user": 42, "ai": true}),
        ];
        let turns = recent_turns(&h, Mode::Basic);
        assert_eq!(turns, vec![ConversationTurn::new("42", "true")]);
    }
}
