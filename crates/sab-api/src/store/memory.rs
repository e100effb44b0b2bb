//! In-memory address store.
//!
//! All operations are synchronous under a `parking_lot::RwLock`; the lock
//! is never held across an `.await`. Contents are lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use sab_core::{Address, AddressId, NewAddress, StorageError, DEFAULT_COUNTRY};

use super::AddressStore;

/// Thread-safe, cloneable address store held in process memory.
///
/// Clones share the same underlying collection.
#[derive(Debug, Clone)]
pub struct MemoryAddressStore {
    records: Arc<RwLock<Vec<Address>>>,
    default_country: String,
}

impl MemoryAddressStore {
    /// Create an empty store that fills in `default_country` when a
    /// submission has none.
    pub fn new(default_country: impl Into<String>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            default_country: default_country.into(),
        }
    }

    /// Number of stored addresses.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryAddressStore {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY)
    }
}

#[async_trait]
impl AddressStore for MemoryAddressStore {
    async fn list(&self) -> Result<Vec<Address>, StorageError> {
        Ok(self.records.read().clone())
    }

    async fn create(&self, new: NewAddress) -> Result<Address, StorageError> {
        let address = new.into_address(AddressId::new(), &self.default_country);
        self.records.write().push(address.clone());
        Ok(address)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
