//! In-Memory Record Store Adapter
//!
//! Keeps the record collection and the sequence counter in process memory.
//! Useful for testing and local development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::RecordDocument;
use crate::domain::foundation::RecordId;
use crate::ports::{RecordStore, StoreError};

/// In-memory implementation of the RecordStore port.
///
/// Documents live in a map keyed by the rendered record id; the sequence
/// counter is independent of the document count, mirroring how the remote
/// store keeps its counter in a dedicated document.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    documents: Arc<RwLock<BTreeMap<String, RecordDocument>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.documents.write().await.clear();
        self.sequence.store(0, Ordering::SeqCst);
    }

    /// Number of stored documents without going through the port.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.documents.read().await.len() as u64)
    }

    async fn next_sequence(&self) -> Result<u64, StoreError> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn persist(&self, id: &RecordId, document: &RecordDocument) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        documents.insert(id.to_string(), document.clone());
        Ok(())
    }

    async fn fetch(&self, id: &RecordId) -> Result<Option<RecordDocument>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id.to_string()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::DocumentValue;

    fn sample_document(marker: i64) -> RecordDocument {
        let mut doc = RecordDocument::new();
        doc.insert("age".into(), DocumentValue::Integer(marker));
        doc
    }

    #[tokio::test]
    async fn count_reflects_persisted_documents() {
        let store = InMemoryRecordStore::new();
        assert_eq!(store.count().await.unwrap(), 0);

        store
            .persist(&RecordId::from_sequence(1), &sample_document(1))
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn next_sequence_starts_at_one_and_increments() {
        let store = InMemoryRecordStore::new();
        assert_eq!(store.next_sequence().await.unwrap(), 1);
        assert_eq!(store.next_sequence().await.unwrap(), 2);
        assert_eq!(store.next_sequence().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn next_sequence_is_distinct_under_concurrency() {
        let store = InMemoryRecordStore::new();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.next_sequence().await.unwrap() }));
        }

        let mut seen = std::collections::HashSet::new();
        for handle in handles {
            assert!(seen.insert(handle.await.unwrap()), "duplicate sequence value");
        }
        assert_eq!(seen.len(), 50);
    }

    #[tokio::test]
    async fn persist_overwrites_existing_document() {
        let store = InMemoryRecordStore::new();
        let id = RecordId::from_sequence(1);

        store.persist(&id, &sample_document(1)).await.unwrap();
        store.persist(&id, &sample_document(2)).await.unwrap();

        let doc = store.fetch(&id).await.unwrap().unwrap();
        assert_eq!(doc.get("age"), Some(&DocumentValue::Integer(2)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fetch_returns_none_for_missing_document() {
        let store = InMemoryRecordStore::new();
        assert!(store.fetch(&RecordId::from_sequence(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_resets_documents_and_sequence() {
        let store = InMemoryRecordStore::new();
        store
            .persist(&RecordId::from_sequence(1), &sample_document(1))
            .await
            .unwrap();
        store.next_sequence().await.unwrap();

        store.clear().await;

        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(store.next_sequence().await.unwrap(), 1);
    }
}
