//! In-memory backend — a `HashMap` behind a tokio `RwLock`.
//!
//! Replaces the original demo's browser-localStorage stand-in. Useful for
//! tests and single-process demos; contents vanish with the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cn_proto::EncryptedNote;

use crate::{error::StoreError, NoteStore};

/// Cheap to clone (Arc internally); clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    notes: Arc<RwLock<HashMap<String, EncryptedNote>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn write(&self, note: &EncryptedNote) -> Result<(), StoreError> {
        let mut notes = self.notes.write().await;
        if notes.contains_key(&note.id) {
            // Ids are UUIDv4 — a duplicate means a caller bug, not a retry.
            return Err(StoreError::WriteFailed(format!(
                "id already exists: {}",
                note.id
            )));
        }
        tracing::debug!(id = %note.id, "memory store write");
        notes.insert(note.id.clone(), note.clone());
        Ok(())
    }

    async fn read(&self, id: &str) -> Result<EncryptedNote, StoreError> {
        self.notes
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_crypto::{aead, NoteKey};

    fn sample_note() -> EncryptedNote {
        let key = NoteKey::generate();
        EncryptedNote::seal(&aead::encrypt(&key, "stored body").unwrap())
    }

    #[tokio::test]
    async fn write_then_read_returns_identical_record() {
        let store = MemoryStore::new();
        let note = sample_note();
        store.write(&note).await.unwrap();
        assert_eq!(store.read(&note.id).await.unwrap(), note);
    }

    #[tokio::test]
    async fn read_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.read("no-such-id").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_write_is_rejected() {
        let store = MemoryStore::new();
        let note = sample_note();
        store.write(&note).await.unwrap();
        let err = store.write(&note).await.unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_contents() {
        let store = MemoryStore::new();
        let clone = store.clone();
        let note = sample_note();
        store.write(&note).await.unwrap();
        assert_eq!(clone.read(&note.id).await.unwrap(), note);
    }
}
