//! Drives a [`FormState`] with real API calls.
//!
//! The controller issues at most one request per user action and waits for
//! it before returning. It never retries.

use async_trait::async_trait;
use sab_core::{Address, AddressDraft};

use crate::client::{AddressBookClient, PinCodeLookup};
use crate::error::ClientError;
use crate::form::{Field, FormState, LookupOutcome};

/// The API operations the form needs. Implemented by
/// [`AddressBookClient`]; tests substitute an in-process fake.
#[async_trait]
pub trait AddressApi: Send + Sync {
    /// Every stored address.
    async fn list_addresses(&self) -> Result<Vec<Address>, ClientError>;
    /// Submit an address; the server validates it.
    async fn create_address(&self, draft: &AddressDraft) -> Result<Address, ClientError>;
    /// Look up city and state for a PIN code.
    async fn resolve_pin_code(&self, pin: &str) -> Result<PinCodeLookup, ClientError>;
}

#[async_trait]
impl AddressApi for AddressBookClient {
    async fn list_addresses(&self) -> Result<Vec<Address>, ClientError> {
        AddressBookClient::list_addresses(self).await
    }

    async fn create_address(&self, draft: &AddressDraft) -> Result<Address, ClientError> {
        AddressBookClient::create_address(self, draft).await
    }

    async fn resolve_pin_code(&self, pin: &str) -> Result<PinCodeLookup, ClientError> {
        AddressBookClient::resolve_pin_code(self, pin).await
    }
}

impl From<Result<PinCodeLookup, ClientError>> for LookupOutcome {
    fn from(result: Result<PinCodeLookup, ClientError>) -> Self {
        match result {
            Ok(PinCodeLookup::Found(details)) => Self::Found(details),
            Ok(PinCodeLookup::Incomplete) => Self::Incomplete,
            Ok(PinCodeLookup::NotFound) => Self::NotFound,
            Err(e) => {
                tracing::warn!("PIN lookup failed: {e}");
                Self::Failed
            }
        }
    }
}

/// Address form bound to an API.
#[derive(Debug)]
pub struct FormController<A> {
    api: A,
    state: FormState,
}

impl<A: AddressApi> FormController<A> {
    /// A blank form over `api`.
    pub fn new(api: A, default_country: impl Into<String>) -> Self {
        Self {
            api,
            state: FormState::new(default_country),
        }
    }

    /// The form as it stands.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The API the form talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Load the address list.
    pub async fn mount(&mut self) {
        self.reload().await;
    }

    /// Set a non-PIN field, or change the PIN code (which may look it up).
    pub async fn edit(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::PinCode => self.change_pin_code(value).await,
            other => {
                self.state.edit_field(other, value);
            }
        }
    }

    /// Update the PIN code and, at full length, autofill city and state.
    pub async fn change_pin_code(&mut self, value: impl Into<String>) {
        let Some(ticket) = self.state.pin_code_changed(value) else {
            return;
        };
        let result = self.api.resolve_pin_code(ticket.pin_code()).await;
        self.state.pin_lookup_resolved(&ticket, result.into());
    }

    /// Submit the current fields. On success the form resets and the list
    /// is reloaded. Returns the stored address.
    pub async fn submit(&mut self) -> Option<Address> {
        let draft = self.state.draft();
        match self.api.create_address(&draft).await {
            Ok(address) => {
                tracing::info!(id = %address.id, "address saved");
                self.state.submit_succeeded();
                self.reload().await;
                Some(address)
            }
            Err(e) => {
                tracing::warn!("save failed: {e}");
                self.state.submit_failed();
                None
            }
        }
    }

    async fn reload(&mut self) {
        match self.api.list_addresses().await {
            Ok(addresses) => self.state.addresses_loaded(addresses),
            Err(e) => {
                tracing::warn!("loading addresses failed: {e}");
                self.state.load_failed();
            }
        }
    }
}
