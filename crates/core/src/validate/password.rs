//! Password composition policy.

use super::ValidationError;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum password length, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 12;

/// Check a password against the composition policy.
///
/// A password must be 8 to 12 characters long and contain at least one ASCII
/// lowercase letter, one ASCII uppercase letter, one ASCII digit and one
/// character that is none of those. Any violation yields the same error.
///
/// # Errors
///
/// Returns `ValidationError::WeakPassword` if any rule is broken.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut special = false;

    for c in password.chars() {
        match c {
            'a'..='z' => lower = true,
            'A'..='Z' => upper = true,
            '0'..='9' => digit = true,
            _ => special = true,
        }
    }

    let long_enough = (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len);
    if long_enough && lower && upper && digit && special {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}
