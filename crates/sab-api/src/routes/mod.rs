//! # API Route Modules
//!
//! - `addresses`: list and create address records.
//! - `pincode`: postal-code to city/state resolution for form autofill.

pub mod addresses;
pub mod pincode;
