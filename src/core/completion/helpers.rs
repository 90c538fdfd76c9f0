//! Message constructors and conversions for the Python-LiteLLM-style API.

use super::router_trait::Message;
use crate::core::types::{ChatMessage, MessageContent, MessageRole};

/// Build a system message.
pub fn system_message(content: impl Into<String>) -> Message {
    Message {
        role: MessageRole::System,
        content: content.into(),
    }
}

/// Build a user message.
pub fn user_message(content: impl Into<String>) -> Message {
    Message {
        role: MessageRole::User,
        content: content.into(),
    }
}

/// Build an assistant message.
pub fn assistant_message(content: impl Into<String>) -> Message {
    Message {
        role: MessageRole::Assistant,
        content: content.into(),
    }
}

/// Convert the Python-LiteLLM-style message list into the wire-level
/// `ChatMessage` list the provider adapters expect.
pub fn convert_messages_to_chat_messages(messages: Vec<Message>) -> Vec<ChatMessage> {
    messages
        .into_iter()
        .map(|m| ChatMessage {
            role: m.role,
            content: Some(MessageContent::Text(m.content)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
            function_call: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_messages_with_expected_roles() {
        assert_eq!(system_message("hi").role, MessageRole::System);
        assert_eq!(user_message("hi").role, MessageRole::User);
        assert_eq!(assistant_message("hi").role, MessageRole::Assistant);
    }

    #[test]
    fn converts_to_chat_messages() {
        let messages = vec![user_message("hello")];
        let chat = convert_messages_to_chat_messages(messages);
        assert_eq!(chat.len(), 1);
        assert!(matches!(chat[0].content, Some(MessageContent::Text(ref t)) if t == "hello"));
    }
}
