//! In-memory contact store for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;
use crate::utils::validation::canonicalize_contact;

/// In-memory contact store implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryContactStore {
    contacts: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryContactStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all contacts (useful for testing)
    pub fn clear(&self) {
        self.contacts.write().unwrap().clear();
    }

    /// Snapshot of the mapping, usable as a read-only directory while
    /// processing statements
    pub fn directory(&self) -> HashMap<String, String> {
        self.contacts.read().unwrap().clone()
    }
}

impl Default for MemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn save_contact(&mut self, contact: &Contact) -> BillResult<()> {
        let contact = canonicalize_contact(contact)?;
        self.contacts
            .write()
            .unwrap()
            .insert(contact.phone_number, contact.display_name);
        Ok(())
    }

    async fn delete_contact(&mut self, phone_number: &str) -> BillResult<()> {
        if self
            .contacts
            .write()
            .unwrap()
            .remove(phone_number)
            .is_some()
        {
            Ok(())
        } else {
            Err(BillError::Storage(format!(
                "No contact stored for {}",
                phone_number
            )))
        }
    }

    async fn get_contact(&self, phone_number: &str) -> BillResult<Option<Contact>> {
        Ok(self
            .contacts
            .read()
            .unwrap()
            .get(phone_number)
            .map(|name| Contact::new(phone_number.to_string(), name.clone())))
    }

    async fn list_contacts(&self) -> BillResult<Vec<Contact>> {
        let contacts = self.contacts.read().unwrap();
        let mut all: Vec<Contact> = contacts
            .iter()
            .map(|(phone, name)| Contact::new(phone.clone(), name.clone()))
            .collect();
        all.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(all)
    }
}

impl ContactDirectory for MemoryContactStore {
    fn display_name(&self, phone_number: &str) -> Option<String> {
        self.contacts.read().unwrap().get(phone_number).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_canonicalizes_the_phone_key() {
        let mut store = MemoryContactStore::new();
        store
            .save_contact(&Contact::new(
                "940.218.8816".to_string(),
                "Alice".to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(
            store.display_name("(940) 218-8816"),
            Some("Alice".to_string())
        );
        assert_eq!(
            store.get_contact("(940) 218-8816").await.unwrap(),
            Some(Contact::new(
                "(940) 218-8816".to_string(),
                "Alice".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_contact() {
        let mut store = MemoryContactStore::new();
        let result = store
            .save_contact(&Contact::new("123".to_string(), "Alice".to_string()))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            BillError::InvalidPhoneNumber(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_contact_is_a_storage_error() {
        let mut store = MemoryContactStore::new();
        let result = store.delete_contact("(940) 218-8816").await;

        assert!(matches!(result.unwrap_err(), BillError::Storage(_)));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let mut store = MemoryContactStore::new();
        store
            .save_contact(&Contact::new(
                "(817) 555-0123".to_string(),
                "Bob".to_string(),
            ))
            .await
            .unwrap();
        store
            .save_contact(&Contact::new(
                "(940) 218-8816".to_string(),
                "Alice".to_string(),
            ))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_contacts()
            .await
            .unwrap()
            .into_iter()
            .map(|contact| contact.display_name)
            .collect();
        assert_eq!(names, vec!["Alice".to_string(), "Bob".to_string()]);
    }
}
