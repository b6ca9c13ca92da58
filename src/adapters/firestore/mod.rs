//! Firestore REST implementation of the RecordStore port.
//!
//! Talks to the Firestore v1 REST surface: documents are written with a
//! full-document PATCH (last-write-wins), the collection size comes from a
//! COUNT aggregation query, and the record sequence is advanced with a
//! server-side `fieldTransforms` increment on a dedicated counter document,
//! the store's own transactional primitive.

mod auth;
mod value;

pub use auth::{ServiceAccountKey, TokenProvider};

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use crate::domain::assessment::RecordDocument;
use crate::domain::foundation::RecordId;
use crate::ports::{RecordStore, StoreError};

use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
/// Field on the counter document holding the last allocated sequence.
const SEQUENCE_FIELD: &str = "sequence";

/// Firestore-backed implementation of the RecordStore port.
///
/// The client handle is constructed once at composition time and injected
/// into whoever needs it; there is no implicit global connection.
#[derive(Debug)]
pub struct FirestoreRecordStore {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    collection: String,
    counter_document: String,
    auth: Option<TokenProvider>,
}

impl FirestoreRecordStore {
    /// Creates a store client for one project and collection.
    ///
    /// `counter_document` is the collection-relative path of the document
    /// holding the sequence counter, e.g. `_counters/records`. Pass no
    /// token provider only when targeting an emulator.
    pub fn new(
        project_id: impl Into<String>,
        collection: impl Into<String>,
        counter_document: impl Into<String>,
        auth: Option<TokenProvider>,
        request_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| StoreError::Connection(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: project_id.into(),
            collection: collection.into(),
            counter_document: counter_document.into(),
            auth,
        })
    }

    /// Points the client at a different API root (Firestore emulator).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `{base}/projects/{p}/databases/(default)/documents`
    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }

    fn document_url(&self, id: &RecordId) -> String {
        format!("{}/{}/{}", self.documents_root(), self.collection, id)
    }

    /// Fully-qualified resource name of the counter document.
    fn counter_resource(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}",
            self.project_id, self.counter_document
        )
    }

    async fn bearer(&self) -> Result<Option<String>, StoreError> {
        match &self.auth {
            Some(provider) => Ok(Some(provider.token().await?)),
            None => Ok(None),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let request = match self.bearer().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request
            .send()
            .await
            .map_err(|e| StoreError::Connection(format!("Store unreachable: {}", e)))
    }
}

#[async_trait]
impl RecordStore for FirestoreRecordStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let body = json!({
            "structuredAggregationQuery": {
                "structuredQuery": {
                    "from": [{ "collectionId": self.collection }]
                },
                "aggregations": [{ "alias": "total", "count": {} }]
            }
        });

        let url = format!("{}:runAggregationQuery", self.documents_root());
        let response = self.send(self.http.post(&url).json(&body)).await?;
        let payload = read_json(response).await?;

        // The aggregation endpoint streams one result element.
        let count_value = payload
            .as_array()
            .and_then(|results| results.first())
            .and_then(|first| first.pointer("/result/aggregateFields/total/integerValue"))
            .ok_or_else(|| {
                StoreError::Backend(format!("Aggregation response missing count: {}", payload))
            })?;

        let count = value::integer_from_wire(count_value)?;
        u64::try_from(count)
            .map_err(|_| StoreError::Backend(format!("Negative collection count: {}", count)))
    }

    async fn next_sequence(&self) -> Result<u64, StoreError> {
        let body = json!({
            "writes": [{
                "transform": {
                    "document": self.counter_resource(),
                    "fieldTransforms": [{
                        "fieldPath": SEQUENCE_FIELD,
                        "increment": { "integerValue": "1" }
                    }]
                }
            }]
        });

        let url = format!("{}:commit", self.documents_root());
        let response = self.send(self.http.post(&url).json(&body)).await?;
        let payload = read_json(response).await?;

        let new_value = payload
            .pointer("/writeResults/0/transformResults/0/integerValue")
            .ok_or_else(|| {
                StoreError::Backend(format!("Commit response missing transform result: {}", payload))
            })?;

        let sequence = value::integer_from_wire(new_value)?;
        u64::try_from(sequence)
            .map_err(|_| StoreError::Backend(format!("Negative sequence value: {}", sequence)))
    }

    async fn persist(&self, id: &RecordId, document: &RecordDocument) -> Result<(), StoreError> {
        let body = value::encode_fields(document);

        // A PATCH without an update mask replaces the whole document,
        // creating it if absent and overwriting it otherwise.
        let response = self.send(self.http.patch(self.document_url(id)).json(&body)).await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(record_id = %id, status = %status, "Record write rejected");
            return Err(map_status(status, detail));
        }

        tracing::info!(record_id = %id, collection = %self.collection, "Record persisted");
        Ok(())
    }

    async fn fetch(&self, id: &RecordId) -> Result<Option<RecordDocument>, StoreError> {
        let response = self.send(self.http.get(self.document_url(id))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let payload = read_json(response).await?;
        Ok(Some(value::decode_fields(&payload)?))
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(map_status(status, detail));
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| StoreError::Backend(format!("Malformed store response: {}", e)))
}

fn map_status(status: StatusCode, detail: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized(detail),
        StatusCode::TOO_MANY_REQUESTS => StoreError::QuotaExceeded(detail),
        _ => StoreError::Backend(format!("{}: {}", status, detail)),
    }
}
