// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Application;

/// Validates that an application's basic field constraints are met.
///
/// This checks required fields only; uniqueness of the email address
/// is enforced by storage.
///
/// # Errors
///
/// Returns an error if:
/// - The first or last name is empty
/// - The email address is empty or has no `@`
pub fn validate_application_fields(application: &Application) -> Result<(), DomainError> {
    if application.first_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "First name cannot be empty",
        )));
    }
    if application.last_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Last name cannot be empty",
        )));
    }
    if application.email.trim().is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }
    if !application.email.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{}' is not a valid email address",
            application.email
        )));
    }
    Ok(())
}

/// Checks that profile fields may be edited in the application's current
/// status.
///
/// # Errors
///
/// Returns `DomainError::ProfileLocked` while the application is under
/// review.
pub fn validate_profile_update(application: &Application) -> Result<(), DomainError> {
    if application.profile_locked() {
        return Err(DomainError::ProfileLocked {
            application_id: application.application_id,
        });
    }
    Ok(())
}

/// Capitalizes the first letter of a display field, leaving the rest
/// unchanged.
#[must_use]
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
