//! Traits for contact-collaborator abstraction and extensibility

use async_trait::async_trait;
use std::collections::HashMap;

use crate::types::*;

/// Read-only phone-number-to-name lookup used while processing a statement
///
/// The core only ever reads this mapping; ownership, persistence, and any
/// concurrent writers belong to the external contact collaborator.
pub trait ContactDirectory {
    /// Resolve the display name for a canonical-format phone number
    fn display_name(&self, phone_number: &str) -> Option<String>;
}

impl ContactDirectory for HashMap<String, String> {
    fn display_name(&self, phone_number: &str) -> Option<String> {
        self.get(phone_number).cloned()
    }
}

/// Write-path abstraction for the contact collaborator
///
/// This trait allows the core to be wired to any contact backend (files,
/// SQL, in-memory, etc.) by implementing these methods. Implementations
/// are expected to key contacts by the canonical phone-number format.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Save a contact, inserting or replacing the entry for its phone number
    async fn save_contact(&mut self, contact: &Contact) -> BillResult<()>;

    /// Delete the contact for a phone number
    async fn delete_contact(&mut self, phone_number: &str) -> BillResult<()>;

    /// Get the contact for a phone number
    async fn get_contact(&self, phone_number: &str) -> BillResult<Option<Contact>>;

    /// List all stored contacts
    async fn list_contacts(&self) -> BillResult<Vec<Contact>>;
}

/// Trait for implementing custom contact validation rules
pub trait ContactValidator: Send + Sync {
    /// Validate a contact before saving
    fn validate_contact(&self, contact: &Contact) -> BillResult<()>;
}

/// Default contact validator with basic rules
pub struct DefaultContactValidator;

impl ContactValidator for DefaultContactValidator {
    fn validate_contact(&self, contact: &Contact) -> BillResult<()> {
        if contact.phone_number.trim().is_empty() {
            return Err(BillError::Validation(
                "Contact phone number cannot be empty".to_string(),
            ));
        }

        if contact.display_name.trim().is_empty() {
            return Err(BillError::Validation(
                "Contact name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
