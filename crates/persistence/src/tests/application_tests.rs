// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::PersistenceError;
use crate::tests::{new_persistence, seed_application};
use enrolink_domain::{AccountId, ApplicationStatus};

#[test]
fn test_insert_assigns_surrogate_key_and_timestamps() {
    let mut persistence = new_persistence();
    let app = seed_application(
        &mut persistence,
        ApplicationStatus::Registered,
        "maria@example.edu",
    );

    assert!(app.application_id > 0);
    assert!(!app.created_at.is_empty());
    assert_eq!(app.status, ApplicationStatus::Registered);
    assert!(app.account_id.is_none());
}

#[test]
fn test_find_round_trips_stored_fields() {
    let mut persistence = new_persistence();
    let app = seed_application(
        &mut persistence,
        ApplicationStatus::Pending,
        "maria@example.edu",
    );

    let found = persistence.find_application(app.application_id).unwrap();
    assert_eq!(found, app);
}

#[test]
fn test_find_missing_application_fails() {
    let mut persistence = new_persistence();
    let result = persistence.find_application(9_999);
    assert_eq!(result, Err(PersistenceError::ApplicationNotFound(9_999)));
}

#[test]
fn test_duplicate_email_is_rejected() {
    let mut persistence = new_persistence();
    seed_application(
        &mut persistence,
        ApplicationStatus::Registered,
        "maria@example.edu",
    );

    let mut duplicate = enrolink_domain::Application::new(
        0,
        String::from("other"),
        String::from("person"),
        String::from("maria@example.edu"),
        String::new(),
    );
    duplicate.status = ApplicationStatus::Registered;
    assert!(persistence.insert_application(&duplicate).is_err());
}

#[test]
fn test_save_updates_profile_and_status() {
    let mut persistence = new_persistence();
    let mut app = seed_application(
        &mut persistence,
        ApplicationStatus::Registered,
        "maria@example.edu",
    );

    app.guardian_name = Some(String::from("Rosa Santos"));
    app.contact_number = Some(String::from("555-0101"));
    app.status = ApplicationStatus::Pending;
    persistence.save_application(&app).unwrap();

    let found = persistence.find_application(app.application_id).unwrap();
    assert_eq!(found.guardian_name.as_deref(), Some("Rosa Santos"));
    assert_eq!(found.status, ApplicationStatus::Pending);
    assert!(found.updated_at.is_some());
}

#[test]
fn test_commit_decision_persists_status_identifier_and_credential() {
    let mut persistence = new_persistence();
    let mut app = seed_application(
        &mut persistence,
        ApplicationStatus::Pending,
        "maria@example.edu",
    );

    app.status = ApplicationStatus::Approved;
    app.account_id = Some(AccountId::new(2025, 1));
    app.temp_password_active = true;
    persistence
        .commit_decision(&app, Some("Tmp2345!Xy"))
        .unwrap();

    let found = persistence.find_application(app.application_id).unwrap();
    assert_eq!(found.status, ApplicationStatus::Approved);
    assert_eq!(found.account_id, Some(AccountId::new(2025, 1)));
    assert!(found.temp_password_active);
    // The credential is stored hashed, never verbatim.
    let stored_hash = found.temp_password_hash.as_deref().unwrap();
    assert_ne!(stored_hash, "Tmp2345!Xy");
    assert!(
        persistence
            .verify_login(app.application_id, "Tmp2345!Xy")
            .unwrap()
    );
    assert!(
        !persistence
            .verify_login(app.application_id, "wrong-password")
            .unwrap()
    );
}

#[test]
fn test_commit_decision_for_missing_application_fails() {
    let mut persistence = new_persistence();
    let mut app = seed_application(
        &mut persistence,
        ApplicationStatus::Pending,
        "maria@example.edu",
    );
    app.application_id = 9_999;
    app.status = ApplicationStatus::Approved;

    let result = persistence.commit_decision(&app, None);
    assert_eq!(result, Err(PersistenceError::ApplicationNotFound(9_999)));
}

#[test]
fn test_identifier_uniqueness_is_enforced_by_storage() {
    let mut persistence = new_persistence();
    let mut first = seed_application(
        &mut persistence,
        ApplicationStatus::Pending,
        "first@example.edu",
    );
    let mut second = seed_application(
        &mut persistence,
        ApplicationStatus::Pending,
        "second@example.edu",
    );

    first.status = ApplicationStatus::Approved;
    first.account_id = Some(AccountId::new(2025, 1));
    persistence.commit_decision(&first, None).unwrap();

    // The same identifier for a second application must be refused.
    second.status = ApplicationStatus::Approved;
    second.account_id = Some(AccountId::new(2025, 1));
    let result = persistence.commit_decision(&second, None);
    assert!(result.is_err());

    // The failed commit left the second application untouched.
    let found = persistence.find_application(second.application_id).unwrap();
    assert_eq!(found.status, ApplicationStatus::Pending);
    assert!(found.account_id.is_none());
}

#[test]
fn test_list_active_excludes_inactive() {
    let mut persistence = new_persistence();
    seed_application(&mut persistence, ApplicationStatus::Pending, "a@example.edu");
    seed_application(
        &mut persistence,
        ApplicationStatus::Approved,
        "b@example.edu",
    );
    seed_application(
        &mut persistence,
        ApplicationStatus::Inactive,
        "c@example.edu",
    );

    let active = persistence.list_active_applications().unwrap();
    assert_eq!(active.len(), 2);
    assert!(
        active
            .iter()
            .all(|app| app.status != ApplicationStatus::Inactive)
    );
}

#[test]
fn test_list_approved_filters_by_status() {
    let mut persistence = new_persistence();
    seed_application(&mut persistence, ApplicationStatus::Pending, "a@example.edu");
    seed_application(
        &mut persistence,
        ApplicationStatus::Approved,
        "b@example.edu",
    );

    let approved = persistence.list_approved_applications().unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].email, "b@example.edu");
}

#[test]
fn test_inactive_applications_cannot_log_in() {
    let mut persistence = new_persistence();
    let mut app = seed_application(
        &mut persistence,
        ApplicationStatus::Approved,
        "maria@example.edu",
    );
    app.temp_password_active = true;
    persistence.commit_decision(&app, Some("Tmp2345!Xy")).unwrap();

    app.status = ApplicationStatus::Inactive;
    persistence.save_application(&app).unwrap();

    assert!(
        !persistence
            .verify_login(app.application_id, "Tmp2345!Xy")
            .unwrap()
    );
}
