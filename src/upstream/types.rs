//! Wire types for the Messages API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of the single message the relay sends.
pub const USER_ROLE: &str = "user";

/// Request body posted upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: USER_ROLE.to_string(),
            content: content.into(),
        }
    }
}

/// Successful completion body. Only `content` matters to the relay;
/// every other field upstream sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
}

/// One block of returned content. Non-text blocks carry no `text`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<Value>,
}

impl ContentBlock {
    /// The block's text. Null or absent reads as empty; any other non-string
    /// value is rendered as its JSON text.
    pub fn text(&self) -> String {
        match &self.text {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => {
                tracing::debug!(
                    kind = self.kind.as_deref().unwrap_or("unknown"),
                    "Skipping content block without text"
                );
                String::new()
            }
        }
    }
}

impl MessagesResponse {
    /// Concatenate the text of every block, in order, with no separator.
    pub fn text(&self) -> String {
        self.content.iter().map(ContentBlock::text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_unset_generation_parameters() {
        let request = MessagesRequest {
            model: "claude-3-opus-20240229".into(),
            max_tokens: 1024,
            messages: vec![Message::user("hello")],
            temperature: None,
            system: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "claude-3-opus-20240229",
                "max_tokens": 1024,
                "messages": [{"role": "user", "content": "hello"}],
            })
        );
    }

    #[test]
    fn text_joins_blocks_in_order() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Hello, "},
                {"type": "text", "text": "world"},
            ],
            "stop_reason": "end_turn",
        }))
        .unwrap();
        assert_eq!(response.text(), "Hello, world");
    }

    #[test]
    fn blocks_without_text_contribute_nothing() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "A"},
                {"type": "tool_use", "id": "toolu_01", "name": "lookup", "input": {}},
                {"text": "B"},
            ]
        }))
        .unwrap();
        assert_eq!(response.content[1].kind.as_deref(), Some("tool_use"));
        assert_eq!(response.text(), "AB");
    }

    #[test]
    fn non_string_text_is_stringified() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "answer: "},
                {"type": "text", "text": 42},
                {"type": "text", "text": null},
                {"type": "text", "text": true},
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), "answer: 42true");
    }

    #[test]
    fn empty_content_is_empty_text() {
        let response: MessagesResponse =
            serde_json::from_value(json!({ "content": [] })).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn missing_content_is_rejected() {
        let result = serde_json::from_value::<MessagesResponse>(json!({ "id": "msg_01" }));
        assert!(result.is_err());
    }
}
