use serde::{ Serialize, Deserialize };
use serde_json::{ Map, Value };

/// A single exported message, kept as an untyped ordered JSON object so that
/// every field survives chunking verbatim.
pub type Message = Map<String, Value>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chunk {
    pub messages: Vec<Message>,
}

impl Chunk {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub type ChunkSet = Vec<Chunk>;
