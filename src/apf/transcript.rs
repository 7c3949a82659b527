use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the interview. Ordering inside a [`Transcript`] is the causal
/// order of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// Append-only interview transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of answered questions so far (user turns).
    pub fn answered_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .count()
    }

    /// Flat `ROLE: content` rendering used as generation context.
    pub fn as_context(&self) -> String {
        self.messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::User => "USER",
                    ChatRole::Model => "MODEL",
                };
                format!("{role}: {}", m.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Truncated per-message summary for the condensed retry prompt.
    pub fn summary(&self, per_message_chars: usize) -> String {
        self.messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                };
                let excerpt: String = m.content.chars().take(per_message_chars).collect();
                format!("{role}: {excerpt}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_preserves_order() {
        let mut t = Transcript::new();
        t.push(ChatMessage::model("Q1"));
        t.push(ChatMessage::user("A1"));
        t.push(ChatMessage::model("Q2"));
        assert_eq!(t.len(), 3);
        assert_eq!(t.as_context(), "MODEL: Q1\nUSER: A1\nMODEL: Q2");
    }

    #[test]
    fn answered_turns_counts_user_messages_only() {
        let mut t = Transcript::new();
        t.push(ChatMessage::model("Q1"));
        t.push(ChatMessage::user("A1"));
        t.push(ChatMessage::model("Q2"));
        t.push(ChatMessage::user("A2"));
        assert_eq!(t.answered_turns(), 2);
    }

    #[test]
    fn summary_truncates_each_message() {
        let mut t = Transcript::new();
        t.push(ChatMessage::user("abcdefghij"));
        assert_eq!(t.summary(4), "user: abcd");
    }
}
