#![deny(missing_docs)]

//! # sab-core: Foundational Types for the Smart Address Book
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies and performs no I/O.
//!
//! ## Design Principles
//!
//! 1. **Newtype identifiers.** [`AddressId`] wraps a UUID and is always valid
//!    by construction.
//!
//! 2. **Validation happens once.** An [`AddressDraft`] (what the wire
//!    carried) becomes a [`NewAddress`] only through
//!    [`AddressDraft::validate`]. Stores accept nothing else, so an
//!    [`Address`] with an empty required field cannot be persisted.
//!
//! 3. **Swappable reference data.** Postal-code lookups go through the
//!    [`PostalCodeDirectory`] trait. [`StaticPostalCodeDirectory`] carries
//!    the seeded table; tests substitute their own fixtures.

pub mod address;
pub mod error;
pub mod pincode;

pub use address::{Address, AddressDraft, AddressId, NewAddress, DEFAULT_COUNTRY};
pub use error::{DirectoryError, StorageError, ValidationError};
pub use pincode::{PinCodeDetails, PostalCodeDirectory, StaticPostalCodeDirectory};
