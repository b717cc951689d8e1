//! Franchise inquiry validation.

use crate::catalog::validate_name;
use crate::error::CoreError;

/// Maximum length of the free-text inquiry message.
pub const MAX_MESSAGE_LEN: usize = 5000;

/// Minimal shape check for a contact email: one `@` with text on both sides
/// and a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid email address: {email}"
        )))
    }
}

pub fn validate_message(message: &str) -> Result<(), CoreError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Message must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "Message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate the required fields of a franchise inquiry.
pub fn validate_inquiry(name: &str, email: &str, message: &str) -> Result<(), CoreError> {
    validate_name("Name", name)?;
    validate_email(email)?;
    validate_message(message)
}
