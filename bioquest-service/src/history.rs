//! Conversation-history handling shared by the chat endpoints.
//!
//! Teacher clients send history as freeform `"role: content"` lines. Each line
//! is parsed on its own into a [`HistoryEntry`]; lines that cannot be parsed
//! are skipped without affecting their neighbours.

use crate::models::{ChatMessage, ChatRole};

const ROLE_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingSeparator,
    UnknownRole(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    Parsed(ChatMessage),
    Skipped(SkipReason),
}

/// Split on the first `": "`; role and content are trimmed.
///
/// The role is matched case-insensitively against `system`, `user` and
/// `assistant` and forwarded in its lowercase form. Any other role is skipped
/// with [`SkipReason::UnknownRole`].
pub fn parse_entry(raw: &str) -> HistoryEntry {
    let Some((role, content)) = raw.split_once(ROLE_SEPARATOR) else {
        return HistoryEntry::Skipped(SkipReason::MissingSeparator);
    };

    match role.parse::<ChatRole>() {
        Ok(role) => HistoryEntry::Parsed(ChatMessage::new(role, content.trim())),
        Err(_) => HistoryEntry::Skipped(SkipReason::UnknownRole(role.trim().to_string())),
    }
}

/// The most recent `limit` items, oldest first.
pub fn most_recent<T>(history: &[T], limit: usize) -> &[T] {
    &history[history.len().saturating_sub(limit)..]
}

/// Bound `history` to its last `limit` lines, then parse what remains.
///
/// Bounding happens before parsing, so skipped lines still count against the
/// limit.
pub fn parse_history(history: &[String], limit: usize) -> Vec<ChatMessage> {
    most_recent(history, limit)
        .iter()
        .fold(Vec::new(), |mut messages, raw| {
            match parse_entry(raw) {
                HistoryEntry::Parsed(message) => messages.push(message),
                HistoryEntry::Skipped(reason) => {
                    tracing::debug!(?reason, "Skipping malformed history entry");
                }
            }
            messages
        })
}

/// `[system] + history + [user]`, the order every chat call uses.
pub fn build_conversation(
    system_prompt: &str,
    history: impl IntoIterator<Item = ChatMessage>,
    message: &str,
) -> Vec<ChatMessage> {
    std::iter::once(ChatMessage::system(system_prompt))
        .chain(history)
        .chain(std::iter::once(ChatMessage::user(message)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_on_first_separator_only() {
        assert_eq!(
            parse_entry("assistant: Step 1: observe the cell"),
            HistoryEntry::Parsed(ChatMessage::new(
                ChatRole::Assistant,
                "Step 1: observe the cell"
            ))
        );
    }

    #[test]
    fn trims_role_and_content() {
        assert_eq!(
            parse_entry("  User :   what is ATP?  "),
            HistoryEntry::Parsed(ChatMessage::user("what is ATP?"))
        );
    }

    #[test]
    fn missing_separator_is_skipped() {
        assert_eq!(
            parse_entry("user:no space here"),
            HistoryEntry::Skipped(SkipReason::MissingSeparator)
        );
    }

    #[test]
    fn role_is_normalised_to_lowercase() {
        assert_eq!(
            parse_entry("ASSISTANT: Mitochondria make ATP."),
            HistoryEntry::Parsed(ChatMessage::new(
                ChatRole::Assistant,
                "Mitochondria make ATP."
            ))
        );
    }

    #[test]
    fn unknown_role_is_skipped() {
        assert_eq!(
            parse_entry("narrator: once upon a time"),
            HistoryEntry::Skipped(SkipReason::UnknownRole("narrator".to_string()))
        );
    }

    #[test]
    fn most_recent_keeps_tail() {
        let items = [1, 2, 3, 4, 5, 6];
        assert_eq!(most_recent(&items, 4), &[3, 4, 5, 6]);
        assert_eq!(most_recent(&items[..2], 4), &[1, 2]);
        assert!(most_recent(&items, 0).is_empty());
    }

    #[test]
    fn only_last_four_of_six_are_parsed() {
        let history = lines(&[
            "user: one",
            "assistant: two",
            "user: three",
            "assistant: four",
            "user: five",
            "assistant: six",
        ]);

        let parsed = parse_history(&history, 4);
        let contents: Vec<&str> = parsed.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["three", "four", "five", "six"]);
    }

    #[test]
    fn malformed_entry_does_not_disturb_later_entries() {
        let history = lines(&["user: hi", "garbage", "assistant: hello", "user: bye"]);

        let parsed = parse_history(&history, 4);
        assert_eq!(
            parsed,
            vec![
                ChatMessage::user("hi"),
                ChatMessage::new(ChatRole::Assistant, "hello"),
                ChatMessage::user("bye"),
            ]
        );
    }

    #[test]
    fn conversation_wraps_history() {
        let conversation = build_conversation("sys", Vec::new(), "Hi");
        assert_eq!(
            conversation,
            vec![ChatMessage::system("sys"), ChatMessage::user("Hi")]
        );
    }
}
