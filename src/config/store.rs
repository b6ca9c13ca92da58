//! Record store configuration

use serde::Deserialize;
use std::time::Duration;

use crate::ports::IdAllocation;

use super::error::ValidationError;

/// Which record store adapter to construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store, for tests and local development
    #[default]
    Memory,
    /// Firestore over its REST surface
    Firestore,
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backend to construct
    #[serde(default)]
    pub backend: StoreBackend,

    /// Collection holding registered records
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Collection-relative path of the sequence counter document
    #[serde(default = "default_counter_document")]
    pub counter_document: String,

    /// How record ids are allocated
    #[serde(default)]
    pub id_allocation: IdAllocation,

    /// Cloud project owning the collection (firestore backend)
    #[serde(default)]
    pub project_id: Option<String>,

    /// Path to the service-account key file (firestore backend)
    #[serde(default)]
    pub credentials_path: Option<String>,

    /// API root override, e.g. a local emulator
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl StoreConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.collection.is_empty() {
            return Err(ValidationError::EmptyCollection);
        }
        if self.counter_document.is_empty() {
            return Err(ValidationError::EmptyCounterDocument);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidBaseUrl);
            }
        }
        if self.backend == StoreBackend::Firestore {
            if self.project_id.as_deref().unwrap_or("").is_empty() {
                return Err(ValidationError::MissingRequired("STORE__PROJECT_ID"));
            }
            // Only an emulator (base_url override) may run without credentials.
            if self.base_url.is_none() && self.credentials_path.as_deref().unwrap_or("").is_empty() {
                return Err(ValidationError::MissingRequired("STORE__CREDENTIALS_PATH"));
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            collection: default_collection(),
            counter_document: default_counter_document(),
            id_allocation: IdAllocation::default(),
            project_id: None,
            credentials_path: None,
            base_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_collection() -> String {
    "survey_data".to_string()
}

fn default_counter_document() -> String {
    "_counters/records".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
