//! # Application State
//!
//! Shared state passed to every route handler via the `State` extractor.
//! The service itself owns no data: the store owns the address collection
//! and the directory owns the postal-code table. Both are trait objects so
//! tests can inject fixtures or failing backends.

use std::sync::Arc;

use sab_core::{PostalCodeDirectory, StaticPostalCodeDirectory};

use crate::config::AppConfig;
use crate::store::{AddressStore, MemoryAddressStore};

/// Shared application state. Clone-friendly via `Arc` internals.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Address persistence backend.
    pub store: Arc<dyn AddressStore>,
    /// Postal-code reference data.
    pub directory: Arc<dyn PostalCodeDirectory>,
    /// Configuration the server was started with.
    pub config: AppConfig,
}

impl AppState {
    /// Default configuration, an empty in-memory store, and the seeded
    /// postal-code table.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// In-memory store and seeded directory under `config`.
    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryAddressStore::new(config.default_country.clone()));
        Self::with_store(config, store)
    }

    /// Use an explicit store with the seeded directory.
    pub fn with_store(config: AppConfig, store: Arc<dyn AddressStore>) -> Self {
        Self {
            store,
            directory: Arc::new(StaticPostalCodeDirectory::seeded()),
            config,
        }
    }

    /// Replace the postal-code directory.
    pub fn with_directory(mut self, directory: Arc<dyn PostalCodeDirectory>) -> Self {
        self.directory = directory;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
