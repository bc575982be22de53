// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::account_id::AccountId;
use crate::application_status::ApplicationStatus;
use serde::{Deserialize, Serialize};

/// A student's application record and its admission lifecycle state.
///
/// The surrogate `application_id` is assigned at registration and never
/// changes. The account identifier is assigned exactly once, when the
/// application first reaches the approved state.
///
/// Credential fields hold stored (hashed) representations; plaintext
/// passwords never live on this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Internal surrogate key, assigned at registration.
    pub application_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Parent or guardian name, if provided on the application form.
    pub guardian_name: Option<String>,
    pub contact_number: Option<String>,
    /// Program association, maintained by the catalog collaborator.
    pub program: Option<String>,
    /// Current lifecycle status.
    pub status: ApplicationStatus,
    /// Set iff the application has ever been approved; never cleared.
    pub account_id: Option<AccountId>,
    /// Free text captured on transition to rejected.
    pub rejection_remarks: Option<String>,
    /// Stored hash of the permanent password.
    pub password_hash: Option<String>,
    /// Stored hash of the temporary first-login password.
    pub temp_password_hash: Option<String>,
    /// Whether the student must still complete a first-login password change.
    pub temp_password_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl Application {
    /// Creates a freshly registered application with empty profile and
    /// credential state.
    #[must_use]
    pub const fn new(
        application_id: i64,
        first_name: String,
        last_name: String,
        email: String,
        created_at: String,
    ) -> Self {
        Self {
            application_id,
            first_name,
            last_name,
            email,
            guardian_name: None,
            contact_number: None,
            program: None,
            status: ApplicationStatus::Registered,
            account_id: None,
            rejection_remarks: None,
            password_hash: None,
            temp_password_hash: None,
            temp_password_active: false,
            created_at,
            updated_at: None,
        }
    }

    /// Profile fields are frozen while the application awaits review.
    #[must_use]
    pub fn profile_locked(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Whether a usable temporary credential is currently issued.
    #[must_use]
    pub fn has_active_temp_credential(&self) -> bool {
        self.temp_password_active
            && self
                .temp_password_hash
                .as_deref()
                .is_some_and(|hash| !hash.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Application {
        Application::new(
            7,
            String::from("ada"),
            String::from("lovelace"),
            String::from("ada@example.edu"),
            String::from("2026-08-01T00:00:00Z"),
        )
    }

    #[test]
    fn test_new_application_starts_registered() {
        let app = sample();
        assert_eq!(app.status, ApplicationStatus::Registered);
        assert!(app.account_id.is_none());
        assert!(!app.temp_password_active);
    }

    #[test]
    fn test_profile_locked_only_while_pending() {
        let mut app = sample();
        assert!(!app.profile_locked());
        app.status = ApplicationStatus::Pending;
        assert!(app.profile_locked());
        app.status = ApplicationStatus::Approved;
        assert!(!app.profile_locked());
    }

    #[test]
    fn test_active_temp_credential_requires_flag_and_value() {
        let mut app = sample();
        assert!(!app.has_active_temp_credential());

        app.temp_password_active = true;
        assert!(!app.has_active_temp_credential());

        app.temp_password_hash = Some(String::new());
        assert!(!app.has_active_temp_credential());

        app.temp_password_hash = Some(String::from("$2b$12$hash"));
        assert!(app.has_active_temp_credential());
    }
}
