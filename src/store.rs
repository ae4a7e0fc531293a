use crate::error::ChunkError;
use crate::models::chat::{ Chunk, ChunkSet };
use log::{ info, warn };
use std::fs;
use std::path::Path;

/// Read-only chunk set loaded once at startup.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkStore {
    chunks: ChunkSet,
}

impl ChunkStore {
    pub fn new(chunks: ChunkSet) -> Self {
        Self { chunks }
    }

    /// Loads the chunk file at `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, ChunkError> {
        if !path.exists() {
            warn!("Data file '{}' not found, serving an empty chunk set", path.display());
            return Ok(Self::default());
        }

        let bytes = fs::read(path).map_err(|e| ChunkError::io(path, e))?;
        let chunks: ChunkSet = serde_json::from_slice(&bytes).map_err(|e|
            ChunkError::format(&format!("Invalid chunk file '{}'", path.display()), e)
        )?;
        info!("Loaded {} chunks from {}", chunks.len(), path.display());

        Ok(Self { chunks })
    }

    pub fn list(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn get(&self, index: usize) -> Result<&Chunk, ChunkError> {
        self.chunks.get(index).ok_or_else(|| ChunkError::NotFound(index.to_string()))
    }

    /// Looks up a chunk from a raw path segment, which must be a non-negative integer.
    pub fn get_by_segment(&self, segment: &str) -> Result<&Chunk, ChunkError> {
        let not_found = || ChunkError::NotFound(segment.to_string());
        // usize parsing alone would accept a leading '+'
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_found());
        }
        let index = segment.parse::<usize>().map_err(|_| not_found())?;
        self.get(index)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::write_chunk_set;
    use crate::models::chat::Message;
    use serde_json::json;

    fn chunk(text: &str) -> Chunk {
        let msg: Message = json!({ "content": text, "id": text }).as_object().cloned().unwrap();
        Chunk::new(vec![msg])
    }

    fn three() -> ChunkStore {
        ChunkStore::new(vec![chunk("a"), chunk("b"), chunk("c")])
    }

    #[test]
    fn test_get_in_range() {
        let store = three();
        assert_eq!(store.get(0).unwrap(), &chunk("a"));
        assert_eq!(store.get(1).unwrap(), &chunk("b"));
        assert_eq!(store.get(2).unwrap(), &chunk("c"));
    }

    #[test]
    fn test_get_out_of_range() {
        let store = three();
        assert!(matches!(store.get(3), Err(ChunkError::NotFound(_))));
        for segment in ["3", "-1", "+1", "abc", "1.5", "", "99999999999999999999999"] {
            assert!(
                matches!(store.get_by_segment(segment), Err(ChunkError::NotFound(_))),
                "segment {:?} should not resolve",
                segment
            );
        }
        assert_eq!(store.get_by_segment("2").unwrap(), &chunk("c"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::load(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.json");
        let original = vec![chunk("x"), chunk("y")];

        write_chunk_set(&original, &path).unwrap();
        let store = ChunkStore::load(&path).unwrap();

        assert_eq!(store.list(), original.as_slice());
    }

    #[test]
    fn test_malformed_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.json");

        for body in ["not json", r#"{"messages": []}"#, r#"[{"items": []}]"#, r#"[{"messages": [1]}]"#] {
            fs::write(&path, body).unwrap();
            assert!(
                matches!(ChunkStore::load(&path), Err(ChunkError::Format(_))),
                "body {:?} should be rejected",
                body
            );
        }
    }
}
