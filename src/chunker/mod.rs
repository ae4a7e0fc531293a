use crate::error::ChunkError;
use crate::models::chat::{ Chunk, ChunkSet, Message };
use crate::models::export::Export;
use log::{ debug, info };
use serde_json::Value;
use std::fs::{ self, File };
use std::io::{ BufWriter, Write };
use std::path::Path;

pub const DEFAULT_CHUNK_SIZE: usize = 2000;

/// Fields holding a message's text, in lookup order.
const TEXT_FIELDS: [&str; 2] = ["content", "text"];

/// Maximum number of characters per chunk. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkLimit(usize);

impl ChunkLimit {
    pub fn new(limit: i64) -> Result<Self, ChunkError> {
        if limit <= 0 {
            return Err(
                ChunkError::Config(format!("chunk size must be a positive integer, got {}", limit))
            );
        }
        usize::try_from(limit)
            .map(ChunkLimit)
            .map_err(|_| ChunkError::Config(format!("chunk size {} is too large", limit)))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ChunkLimit {
    fn default() -> Self {
        ChunkLimit(DEFAULT_CHUNK_SIZE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkSummary {
    pub conversations: usize,
    pub empty_conversations: usize,
    pub messages: usize,
    pub chunks: usize,
}

/// Size of a message: the first of `content`/`text` holding a truthy value.
///
/// Strings count characters, objects count keys, arrays count elements. `null`,
/// empty values, `0` and `false` fall through to the next field. Other numbers
/// and `true` count the characters of their JSON form.
pub fn message_len(message: &Message) -> usize {
    TEXT_FIELDS.iter()
        .filter_map(|field| message.get(*field))
        .find_map(value_len)
        .unwrap_or(0)
}

fn value_len(value: &Value) -> Option<usize> {
    let len = match value {
        Value::Null | Value::Bool(false) => 0,
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Number(n) if n.as_f64() == Some(0.0) => 0,
        Value::Number(_) | Value::Bool(true) => value.to_string().chars().count(),
    };
    (len > 0).then_some(len)
}

/// Groups consecutive messages into chunks of at most `limit` characters.
///
/// The size check happens before a message is appended and is skipped while the
/// current chunk is empty, so one oversized message still forms its own chunk.
pub fn partition(messages: Vec<Message>, limit: ChunkLimit) -> Vec<Chunk> {
    let limit = limit.get();
    let mut chunks = Vec::new();
    let mut current: Vec<Message> = Vec::new();
    let mut length = 0usize;

    for msg in messages {
        let text_len = message_len(&msg);
        if length + text_len > limit && !current.is_empty() {
            chunks.push(Chunk::new(std::mem::take(&mut current)));
            length = 0;
        }
        current.push(msg);
        length += text_len;
    }

    if !current.is_empty() {
        chunks.push(Chunk::new(current));
    }

    chunks
}

pub fn build_chunk_set(export: &Export, limit: ChunkLimit) -> Result<ChunkSet, ChunkError> {
    build_with_summary(export, limit).map(|(set, _)| set)
}

fn build_with_summary(
    export: &Export,
    limit: ChunkLimit
) -> Result<(ChunkSet, ChunkSummary), ChunkError> {
    let conversations = export.conversations()?;
    let mut summary = ChunkSummary {
        conversations: conversations.len(),
        ..Default::default()
    };
    let mut chunk_set = ChunkSet::new();

    for (position, conv) in conversations.iter().enumerate() {
        if conv.is_empty() {
            summary.empty_conversations += 1;
            debug!("Conversation {} has no messages, skipping", position);
            continue;
        }
        let chunks = partition(conv.to_messages(), limit);
        debug!("Conversation {}: {} messages -> {} chunks", position, conv.len(), chunks.len());
        summary.messages += conv.len();
        chunk_set.extend(chunks);
    }
    summary.chunks = chunk_set.len();

    Ok((chunk_set, summary))
}

pub fn read_export(path: &Path) -> Result<Export, ChunkError> {
    let bytes = fs::read(path).map_err(|e| ChunkError::io(path, e))?;
    Export::from_slice(&bytes)
}

/// Writes the chunk set as indented JSON, replacing whatever is at `path`.
pub fn write_chunk_set(chunk_set: &[Chunk], path: &Path) -> Result<(), ChunkError> {
    let file = File::create(path).map_err(|e| ChunkError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, chunk_set).map_err(|e|
        ChunkError::io(path, e.into())
    )?;
    writer.flush().map_err(|e| ChunkError::io(path, e))?;
    Ok(())
}

pub fn chunk_file(
    input: &Path,
    output: &Path,
    limit: ChunkLimit
) -> Result<ChunkSummary, ChunkError> {
    info!("Reading export from {}", input.display());
    let export = read_export(input)?;
    let (chunk_set, summary) = build_with_summary(&export, limit)?;
    write_chunk_set(&chunk_set, output)?;
    info!(
        "Wrote {} chunks from {} messages ({} conversations, {} empty) to {}",
        summary.chunks,
        summary.messages,
        summary.conversations,
        summary.empty_conversations,
        output.display()
    );
    Ok(summary)
}
