//! Conversation messages exchanged with the chat endpoint.
//!
//! A [`Message`] serializes exactly as the chat endpoint expects it, `{"role": "user", "content":
//! "..."}`, so the history can be sent as-is and the reply decoded straight back into one.

use std::fmt;

use super::*;

/// Fixed reply used whenever the chat endpoint cannot produce one.
pub const FALLBACK_REPLY: &str = "I'm sorry, I encountered an error while processing your request.";

/// Who wrote a [`Message`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// The person at the keyboard.
  User,
  /// The chat service.
  Assistant,
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Role::User => write!(f, "user"),
      Role::Assistant => write!(f, "assistant"),
    }
  }
}

/// One entry in the conversation history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
  /// Author of the message
  pub role:    Role,
  /// Message text, possibly markdown when it comes from the assistant
  pub content: String,
}

impl Message {
  /// A message typed by the user.
  pub fn user(content: impl Into<String>) -> Self { Self { role: Role::User, content: content.into() } }

  /// A message from the assistant.
  pub fn assistant(content: impl Into<String>) -> Self {
    Self { role: Role::Assistant, content: content.into() }
  }

  /// The assistant message that opens a conversation about `title`.
  pub fn framing(title: &str) -> Self {
    Self::assistant(format!(
      "Great! Let's discuss the paper titled \"{title}\". What would you like to know about it?"
    ))
  }

  /// The assistant message substituted for a failed chat request.
  pub fn fallback() -> Self { Self::assistant(FALLBACK_REPLY) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_message_wire_format() {
    let json = serde_json::to_value(Message::user("hi")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "user", "content": "hi" }));

    let reply: Message =
      serde_json::from_str(r#"{"content": "hello", "role": "assistant"}"#).unwrap();
    assert_eq!(reply, Message::assistant("hello"));
  }

  #[test]
  fn test_unknown_role_is_rejected() {
    assert!(serde_json::from_str::<Message>(r#"{"role": "system", "content": "x"}"#).is_err());
  }

  #[test]
  fn test_framing_message() {
    let message = Message::framing("Notes on Y");
    assert_eq!(message.role, Role::Assistant);
    assert_eq!(
      message.content,
      "Great! Let's discuss the paper titled \"Notes on Y\". What would you like to know about it?"
    );
  }
}
