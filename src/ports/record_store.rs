//! Record Store Port - Persistence of registered risk records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::assessment::RecordDocument;
use crate::domain::foundation::{DomainError, ErrorCode, RecordId};

/// Errors raised by record store implementations.
///
/// Store failures always surface to the caller: the core never retries on
/// its own (every call is triggered once by an explicit confirmation) and
/// never swallows a persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("Store quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Record could not be encoded for the store: {0}")]
    Serialization(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::Connection(_) => ErrorCode::StoreUnavailable,
            StoreError::Unauthorized(_) => ErrorCode::Unauthorized,
            StoreError::QuotaExceeded(_) => ErrorCode::QuotaExceeded,
            StoreError::Backend(_) => ErrorCode::StoreUnavailable,
            StoreError::Serialization(_) => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}

/// How registration derives the next record identifier.
///
/// The collection historically derived ids by counting existing documents.
/// Two concurrent confirmations can read the same count, derive the same
/// id, and the later persist silently overwrites the earlier record. The
/// atomic counter uses the store's own increment primitive and is the
/// default; the count-derived strategy remains for single-submitter
/// deployments that must stay aligned with an existing collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdAllocation {
    /// Read the collection size and use count + 1 (racy under concurrency).
    CountDerived,
    /// Atomically increment a dedicated sequence counter.
    #[default]
    AtomicCounter,
}

/// Port for the remote document collection holding registered records.
///
/// # Contract
///
/// Implementations must:
/// - Persist a document all-or-nothing: a failed `persist` leaves either
///   the prior document or nothing, never a partial write
/// - Treat `persist` as document-level last-write-wins: create if absent,
///   overwrite silently if the id already exists
/// - Make `next_sequence` atomic with respect to concurrent callers
/// - Map backend failures onto `StoreError` instead of panicking
///
/// Records are append-only: this system never updates or deletes a
/// document after creation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Number of record documents currently in the collection.
    ///
    /// Feeds the legacy count-derived id allocation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be counted.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Atomically increments the record sequence and returns the new value.
    ///
    /// Two concurrent callers always observe distinct values.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the counter cannot be advanced.
    async fn next_sequence(&self) -> Result<u64, StoreError>;

    /// Writes the document under the given id, overwriting any existing one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on connectivity loss, authentication failure,
    /// or backend quota/permission errors.
    async fn persist(&self, id: &RecordId, document: &RecordDocument) -> Result<(), StoreError>;

    /// Reads the document stored under the given id.
    ///
    /// Returns `Ok(None)` if no document exists. Used for integrity checks
    /// and tests; the system itself never reads records back in production
    /// flows.
    async fn fetch(&self, id: &RecordId) -> Result<Option<RecordDocument>, StoreError>;
}
