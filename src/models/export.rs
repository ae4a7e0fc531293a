use crate::error::ChunkError;
use crate::models::chat::Message;
use serde_json::Value;

/// Raw conversation export, accepted either as `{"conversations": [...]}` or as
/// a bare array of conversations.
#[derive(Clone, Debug, PartialEq)]
pub struct Export(Value);

impl Export {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ChunkError> {
        let value = serde_json::from_slice(bytes).map_err(|e|
            ChunkError::format("Export is not valid JSON", e)
        )?;
        Ok(Self(value))
    }

    pub fn conversations(&self) -> Result<Vec<Conversation<'_>>, ChunkError> {
        let list = match &self.0 {
            Value::Object(map) =>
                match map.get("conversations") {
                    Some(Value::Array(list)) => list,
                    Some(_) => {
                        return Err(
                            ChunkError::Format("'conversations' must be an array".to_string())
                        );
                    }
                    None => {
                        return Err(
                            ChunkError::Format(
                                "Export object has no 'conversations' array".to_string()
                            )
                        );
                    }
                }
            Value::Array(list) => list,
            other => {
                return Err(
                    ChunkError::Format(
                        format!("Unsupported export format: top level is {}", kind_of(other))
                    )
                );
            }
        };

        list.iter()
            .enumerate()
            .map(|(position, value)| Conversation::from_value(position, value))
            .collect()
    }
}

/// Borrowed view over one conversation's messages. Other metadata is ignored.
#[derive(Debug)]
pub struct Conversation<'a> {
    pub messages: &'a [Value],
}

impl<'a> Conversation<'a> {
    fn from_value(position: usize, value: &'a Value) -> Result<Self, ChunkError> {
        let map = value
            .as_object()
            .ok_or_else(||
                ChunkError::Format(
                    format!("Conversation {} is {}, expected an object", position, kind_of(value))
                )
            )?;

        let messages = match map.get("messages") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(list)) => list.as_slice(),
            Some(other) => {
                return Err(
                    ChunkError::Format(
                        format!(
                            "Conversation {} has 'messages' of type {}, expected an array",
                            position,
                            kind_of(other)
                        )
                    )
                );
            }
        };

        for (index, msg) in messages.iter().enumerate() {
            if !msg.is_object() {
                return Err(
                    ChunkError::Format(
                        format!(
                            "Message {} of conversation {} is {}, expected an object",
                            index,
                            position,
                            kind_of(msg)
                        )
                    )
                );
            }
        }

        Ok(Self { messages })
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Messages as owned JSON objects, in export order.
    pub fn to_messages(&self) -> Vec<Message> {
        self.messages
            .iter()
            .filter_map(|v| v.as_object().cloned())
            .collect()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
