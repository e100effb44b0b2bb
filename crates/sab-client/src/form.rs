//! # Address Form State Machine
//!
//! [`FormState`] holds everything the address form shows: the field
//! values, at most one banner message, and the last-loaded address list.
//! Every user or network event is a method that moves the state forward.
//! None of them perform I/O; [`crate::controller::FormController`] pairs
//! them with API calls.
//!
//! ## PIN lookups
//!
//! Changing the PIN code to exactly [`PIN_CODE_LENGTH`] characters issues a
//! [`LookupTicket`]. Tickets carry a sequence number, and only a resolution
//! for the most recently issued ticket is applied. A slow answer for an
//! earlier code can therefore never overwrite the city and state of a later
//! one.

use sab_core::{Address, AddressDraft, PinCodeDetails};

/// Banner shown when the address list cannot be loaded.
pub const LOAD_FAILED_BANNER: &str = "Failed to load addresses.";
/// Banner shown when the server does not know a PIN code.
pub const INVALID_PIN_BANNER: &str = "Invalid PIN code.";
/// Banner shown when a PIN lookup fails in transport or on the server.
pub const PIN_LOOKUP_FAILED_BANNER: &str = "Failed to fetch city/state. Please check the PIN code.";
/// Banner shown when a submission is rejected.
pub const SAVE_FAILED_BANNER: &str = "Failed to save address.";

/// Length at which a PIN code edit triggers a lookup.
pub const PIN_CODE_LENGTH: usize = 6;

/// An editable form field. Country is fixed and not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Street line.
    AddressLine1,
    /// City name.
    City,
    /// State name.
    State,
    /// Postal (PIN) code.
    PinCode,
}

/// Current values of the form inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    /// Street line.
    pub address_line1: String,
    /// City, typed or filled from the PIN code.
    pub city: String,
    /// State, typed or filled from the PIN code.
    pub state: String,
    /// Fixed country.
    pub country: String,
    /// Postal (PIN) code as typed.
    pub pin_code: String,
}

impl FormFields {
    /// Blank fields with the given country.
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            address_line1: String::new(),
            city: String::new(),
            state: String::new(),
            country: country.into(),
            pin_code: String::new(),
        }
    }

    /// Value of one field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::AddressLine1 => &self.address_line1,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::PinCode => &self.pin_code,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::AddressLine1 => self.address_line1 = value,
            Field::City => self.city = value,
            Field::State => self.state = value,
            Field::PinCode => self.pin_code = value,
        }
    }

    /// The submission body for these values. Every field is sent, empty or
    /// not; the server decides what is missing.
    pub fn to_draft(&self) -> AddressDraft {
        AddressDraft {
            address_line1: Some(self.address_line1.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            country: Some(self.country.clone()),
            pin_code: Some(self.pin_code.clone()),
        }
    }
}

/// Handle for one in-flight PIN lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    seq: u64,
    pin_code: String,
}

impl LookupTicket {
    /// Issue order; later tickets have larger numbers.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The code to look up.
    pub fn pin_code(&self) -> &str {
        &self.pin_code
    }
}

/// How a PIN lookup ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// City and state were both returned.
    Found(PinCodeDetails),
    /// The server answered but city or state was missing.
    Incomplete,
    /// The server does not know the code.
    NotFound,
    /// Transport failure or unexpected server error.
    Failed,
}

/// State of the address form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: FormFields,
    default_country: String,
    banner: Option<String>,
    addresses: Vec<Address>,
    issued_lookups: u64,
}

impl FormState {
    /// Empty form, no banner, no addresses loaded.
    pub fn new(default_country: impl Into<String>) -> Self {
        let default_country = default_country.into();
        Self {
            fields: FormFields::new(default_country.clone()),
            default_country,
            banner: None,
            addresses: Vec::new(),
            issued_lookups: 0,
        }
    }

    /// Current field values.
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// The message currently shown, if any. Later messages replace earlier
    /// ones.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Addresses from the last successful load.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// The submission body for the current field values.
    pub fn draft(&self) -> AddressDraft {
        self.fields.to_draft()
    }

    /// The list request succeeded.
    pub fn addresses_loaded(&mut self, addresses: Vec<Address>) {
        self.addresses = addresses;
    }

    /// The list request failed. Whatever was loaded before stays shown.
    pub fn load_failed(&mut self) {
        self.set_banner(LOAD_FAILED_BANNER);
    }

    /// The user typed into `field`. Edits to the PIN code go through
    /// [`Self::pin_code_changed`] and may return a lookup ticket.
    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) -> Option<LookupTicket> {
        match field {
            Field::PinCode => self.pin_code_changed(value),
            other => {
                self.fields.set(other, value.into());
                None
            }
        }
    }

    /// The PIN code changed. The field is always updated; a ticket is
    /// issued only when the new value is exactly [`PIN_CODE_LENGTH`]
    /// characters long.
    pub fn pin_code_changed(&mut self, value: impl Into<String>) -> Option<LookupTicket> {
        let value = value.into();
        let lookup = value.chars().count() == PIN_CODE_LENGTH;
        self.fields.pin_code = value;
        if !lookup {
            return None;
        }
        self.issued_lookups += 1;
        Some(LookupTicket {
            seq: self.issued_lookups,
            pin_code: self.fields.pin_code.clone(),
        })
    }

    /// A PIN lookup finished. Returns `false` and changes nothing when
    /// `ticket` is not the most recently issued one.
    pub fn pin_lookup_resolved(&mut self, ticket: &LookupTicket, outcome: LookupOutcome) -> bool {
        if ticket.seq != self.issued_lookups {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued_lookups,
                "discarding stale PIN lookup"
            );
            return false;
        }
        match outcome {
            LookupOutcome::Found(details) => {
                self.fields.city = details.city;
                self.fields.state = details.state;
                self.banner = None;
            }
            LookupOutcome::Incomplete | LookupOutcome::NotFound => {
                self.set_banner(INVALID_PIN_BANNER);
            }
            LookupOutcome::Failed => self.set_banner(PIN_LOOKUP_FAILED_BANNER),
        }
        true
    }

    /// The submission was stored. Fields return to their defaults and the
    /// banner clears; the caller reloads the list.
    pub fn submit_succeeded(&mut self) {
        self.fields = FormFields::new(self.default_country.clone());
        self.banner = None;
    }

    /// The submission was rejected. Field values are kept for correction.
    pub fn submit_failed(&mut self) {
        self.set_banner(SAVE_FAILED_BANNER);
    }

    fn set_banner(&mut self, message: &str) {
        self.banner = Some(message.to_string());
    }
}
