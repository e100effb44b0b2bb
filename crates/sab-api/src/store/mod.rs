//! # Address Persistence
//!
//! The [`AddressStore`] trait is the only path from the HTTP layer to
//! durable state. Two backends ship:
//!
//! - [`MemoryAddressStore`]: process-local, for development and tests.
//! - [`PgAddressStore`]: PostgreSQL via SQLx, selected when `DATABASE_URL`
//!   is set.
//!
//! Both return addresses in insertion order. Callers must not depend on
//! that; the contract only promises "all records".
//!
//! The store assigns identifiers and applies the default country. It never
//! validates: it only accepts a [`NewAddress`], which already passed
//! presence validation.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAddressStore;
pub use postgres::{init_pool, PgAddressStore};

use async_trait::async_trait;
use sab_core::{Address, NewAddress, StorageError};

/// Persistence boundary for the address collection.
///
/// Implementations must be safe to call concurrently from many request
/// handlers. Concurrent writes are serialized by the backend; no ordering
/// between them is promised.
#[async_trait]
pub trait AddressStore: Send + Sync + std::fmt::Debug {
    /// Every persisted address. An empty collection is `Ok(vec![])`.
    async fn list(&self) -> Result<Vec<Address>, StorageError>;

    /// Persist `new` under a fresh identifier and return the stored record.
    async fn create(&self, new: NewAddress) -> Result<Address, StorageError>;

    /// Check that the backend is reachable. Backs the readiness probe.
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
