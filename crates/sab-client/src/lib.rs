#![deny(missing_docs)]

//! # sab-client -- Typed client and form logic for the Smart Address Book
//!
//! - [`AddressBookClient`]: one typed method per HTTP endpoint.
//! - [`FormState`]: the address form as a pure state machine (fields,
//!   banner, loaded list, PIN lookup tickets).
//! - [`FormController`]: runs form events against an [`AddressApi`].
//! - [`render`]: terminal table and banner output used by the `sab` binary.
//!
//! The client talks to the server only over HTTP. Validation of
//! submissions is the server's job; the client sends every field and shows
//! a banner when the server refuses.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod render;

pub use client::{AddressBookClient, PinCodeLookup};
pub use config::ClientConfig;
pub use controller::{AddressApi, FormController};
pub use error::ClientError;
pub use form::{Field, FormState, LookupOutcome, LookupTicket};
