// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use enrolink_domain::{Application, ApplicationStatus};

/// Source of fresh temporary passwords.
///
/// The api crate provides the CSPRNG-backed implementation; tests supply
/// fixed issuers so transitions stay deterministic.
pub trait CredentialIssuer {
    /// Produces a fresh temporary password, in plaintext.
    fn issue(&self) -> String;
}

/// Whether an approved application's temporary-credential state is
/// inconsistent and due for backfill repair.
///
/// A record needs repair when its flag says a temporary credential is
/// active but the stored temporary value is missing, empty, or equal to
/// the stored permanent value. Stored-value equality identifies records
/// that were imported or migrated without ever differentiating the two
/// credentials (the values were copied verbatim).
#[must_use]
pub fn needs_credential_repair(application: &Application) -> bool {
    if application.status != ApplicationStatus::Approved {
        return false;
    }
    if !application.temp_password_active {
        return false;
    }
    match (
        application.temp_password_hash.as_deref(),
        application.password_hash.as_deref(),
    ) {
        (None, _) => true,
        (Some(""), _) => true,
        (Some(temp), Some(permanent)) => temp == permanent,
        (Some(_), None) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved() -> Application {
        let mut app = Application::new(
            1,
            String::from("Ada"),
            String::from("Lovelace"),
            String::from("ada@example.edu"),
            String::from("2026-08-01T00:00:00Z"),
        );
        app.status = ApplicationStatus::Approved;
        app
    }

    #[test]
    fn test_healthy_record_needs_no_repair() {
        let mut app = approved();
        app.temp_password_active = true;
        app.temp_password_hash = Some(String::from("$2b$12$temp"));
        app.password_hash = Some(String::from("$2b$12$perm"));
        assert!(!needs_credential_repair(&app));
    }

    #[test]
    fn test_missing_temp_value_with_active_flag_needs_repair() {
        let mut app = approved();
        app.temp_password_active = true;
        app.temp_password_hash = None;
        assert!(needs_credential_repair(&app));

        app.temp_password_hash = Some(String::new());
        assert!(needs_credential_repair(&app));
    }

    #[test]
    fn test_undifferentiated_credentials_need_repair() {
        let mut app = approved();
        app.temp_password_active = true;
        app.temp_password_hash = Some(String::from("$2b$12$same"));
        app.password_hash = Some(String::from("$2b$12$same"));
        assert!(needs_credential_repair(&app));
    }

    #[test]
    fn test_inactive_flag_needs_no_repair() {
        let mut app = approved();
        app.temp_password_active = false;
        app.temp_password_hash = None;
        assert!(!needs_credential_repair(&app));
    }

    #[test]
    fn test_non_approved_statuses_are_skipped() {
        for status in [
            ApplicationStatus::Registered,
            ApplicationStatus::Pending,
            ApplicationStatus::Rejected,
            ApplicationStatus::Inactive,
        ] {
            let mut app = approved();
            app.status = status;
            app.temp_password_active = true;
            app.temp_password_hash = None;
            assert!(!needs_credential_repair(&app), "status {status}");
        }
    }
}
