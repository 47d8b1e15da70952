//! Validation utilities

use crate::statement::normalize_phone_number;
use crate::traits::*;
use crate::types::*;

/// Validate that a contact display name is usable
pub fn validate_display_name(name: &str) -> BillResult<()> {
    if name.trim().is_empty() {
        return Err(BillError::Validation(
            "Contact name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(BillError::Validation(
            "Contact name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a contact and return it keyed by the canonical phone format.
///
/// Statement processing looks contacts up by canonical phone number, so
/// stores normalize the key on save to keep lookups hitting.
pub fn canonicalize_contact(contact: &Contact) -> BillResult<Contact> {
    validate_display_name(&contact.display_name)?;
    let phone_number = normalize_phone_number(&contact.phone_number)?;

    Ok(Contact::new(
        phone_number,
        contact.display_name.trim().to_string(),
    ))
}

/// Contact validator enforcing a canonicalizable phone number on top of
/// the basic name rules
pub struct EnhancedContactValidator;

impl ContactValidator for EnhancedContactValidator {
    fn validate_contact(&self, contact: &Contact) -> BillResult<()> {
        validate_display_name(&contact.display_name)?;
        normalize_phone_number(&contact.phone_number)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_rewrites_phone_key() {
        let contact = Contact::new("940.218.8816".to_string(), " Alice ".to_string());
        let canonical = canonicalize_contact(&contact).unwrap();
        assert_eq!(canonical.phone_number, "(940) 218-8816");
        assert_eq!(canonical.display_name, "Alice");
    }

    #[test]
    fn test_canonicalize_rejects_bad_phone() {
        let contact = Contact::new("555-0123".to_string(), "Alice".to_string());
        assert!(matches!(
            canonicalize_contact(&contact).unwrap_err(),
            BillError::InvalidPhoneNumber(_)
        ));
    }

    #[test]
    fn test_name_length_limit() {
        let err = validate_display_name(&"x".repeat(101)).unwrap_err();
        assert!(matches!(err, BillError::Validation(_)));
    }

    #[test]
    fn test_enhanced_validator_checks_both_fields() {
        let validator = EnhancedContactValidator;
        let good = Contact::new("(940) 218-8816".to_string(), "Alice".to_string());
        let bad = Contact::new("(940) 218-8816".to_string(), "".to_string());

        assert!(validator.validate_contact(&good).is_ok());
        assert!(validator.validate_contact(&bad).is_err());
    }
}
