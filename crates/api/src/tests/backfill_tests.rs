// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::run_backfill;
use crate::tests::helpers::{approve_request, create_test_admin, new_persistence, seed_application};
use enrolink_domain::{Application, ApplicationStatus};
use enrolink_persistence::Persistence;

/// Seeds an approved application whose credential state bypassed the
/// normal approval path: flag active, no temporary value stored.
fn seed_inconsistent(persistence: &mut Persistence, email: &str) -> Application {
    let mut app: Application = Application::new(
        0,
        String::from("maria"),
        String::from("santos"),
        String::from(email),
        String::new(),
    );
    app.status = ApplicationStatus::Approved;
    app.temp_password_active = true;
    match persistence.insert_application(&app) {
        Ok(stored) => stored,
        Err(e) => panic!("failed to seed application: {e}"),
    }
}

#[test]
fn test_backfill_repairs_inconsistent_records() {
    let mut persistence = new_persistence();
    let broken = seed_inconsistent(&mut persistence, "a@example.edu");
    seed_application(&mut persistence, ApplicationStatus::Pending, "b@example.edu");

    let repaired = run_backfill(&mut persistence).unwrap();
    assert_eq!(repaired, 1);

    let fixed = persistence.find_application(broken.application_id).unwrap();
    assert!(fixed.temp_password_active);
    assert!(fixed.temp_password_hash.as_deref().is_some_and(|h| !h.is_empty()));
    // No permanent password existed, so it was seeded alongside.
    assert!(fixed.password_hash.as_deref().is_some_and(|h| !h.is_empty()));
    assert_ne!(fixed.temp_password_hash, fixed.password_hash);
}

#[test]
fn test_backfill_is_idempotent() {
    let mut persistence = new_persistence();
    seed_inconsistent(&mut persistence, "a@example.edu");
    seed_inconsistent(&mut persistence, "b@example.edu");

    assert_eq!(run_backfill(&mut persistence).unwrap(), 2);
    // No new inconsistencies: the second run repairs nothing.
    assert_eq!(run_backfill(&mut persistence).unwrap(), 0);
}

#[test]
fn test_backfill_skips_healthy_approvals() {
    let mut persistence = new_persistence();
    let app = seed_application(
        &mut persistence,
        ApplicationStatus::Pending,
        "juan@example.edu",
    );
    let admin = create_test_admin();
    crate::decide_application(&mut persistence, &approve_request(app.application_id), &admin)
        .unwrap();

    // Normal approval already issued a consistent credential.
    assert_eq!(run_backfill(&mut persistence).unwrap(), 0);
}

#[test]
fn test_backfill_preserves_an_existing_permanent_password() {
    let mut persistence = new_persistence();
    let mut app: Application = Application::new(
        0,
        String::from("maria"),
        String::from("santos"),
        String::from("a@example.edu"),
        String::new(),
    );
    app.status = ApplicationStatus::Approved;
    app.temp_password_active = true;
    app.password_hash = Some(String::from("$2b$12$existing-permanent-hash"));
    let stored = persistence.insert_application(&app).unwrap();

    assert_eq!(run_backfill(&mut persistence).unwrap(), 1);

    let fixed = persistence.find_application(stored.application_id).unwrap();
    assert_eq!(
        fixed.password_hash.as_deref(),
        Some("$2b$12$existing-permanent-hash")
    );
    assert!(fixed.temp_password_hash.as_deref().is_some_and(|h| !h.is_empty()));
}

#[test]
fn test_backfill_with_no_approved_records_is_a_noop() {
    let mut persistence = new_persistence();
    seed_application(&mut persistence, ApplicationStatus::Pending, "a@example.edu");
    assert_eq!(run_backfill(&mut persistence).unwrap(), 0);
}
