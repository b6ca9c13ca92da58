//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RecordStore` - Persistence of registered risk records in the remote
//!   document collection, including sequence allocation

mod record_store;

pub use record_store::{IdAllocation, RecordStore, StoreError};
