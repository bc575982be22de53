// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{AuthenticatedActor, DecideApplicationRequest, Role};
use enrolink_domain::{Application, ApplicationStatus};
use enrolink_persistence::Persistence;

pub fn new_persistence() -> Persistence {
    match Persistence::new_in_memory() {
        Ok(persistence) => persistence,
        Err(e) => panic!("failed to initialize in-memory database: {e}"),
    }
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("admin-123"),
        String::from("Dean Rivera"),
        Role::Admin,
    )
}

/// An applicant principal acting on their own application.
pub fn create_applicant(application_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(
        application_id.to_string(),
        String::from("Applicant"),
        Role::Applicant,
    )
}

pub fn seed_application(
    persistence: &mut Persistence,
    status: ApplicationStatus,
    email: &str,
) -> Application {
    let mut app: Application = Application::new(
        0,
        String::from("juan"),
        String::from("dela cruz"),
        String::from(email),
        String::new(),
    );
    app.status = status;
    match persistence.insert_application(&app) {
        Ok(stored) => stored,
        Err(e) => panic!("failed to seed application: {e}"),
    }
}

pub fn approve_request(application_id: i64) -> DecideApplicationRequest {
    DecideApplicationRequest {
        application_id,
        decision: String::from("APPROVED"),
        remarks: None,
    }
}

pub fn reject_request(application_id: i64, remarks: &str) -> DecideApplicationRequest {
    DecideApplicationRequest {
        application_id,
        decision: String::from("REJECTED"),
        remarks: Some(String::from(remarks)),
    }
}

/// Asserts the `YY-NNNN-CCC` layout.
pub fn assert_identifier_shape(identifier: &str) {
    let parts: Vec<&str> = identifier.split('-').collect();
    assert_eq!(parts.len(), 3, "unexpected layout: {identifier}");
    assert_eq!(parts[0].len(), 2, "unexpected year segment: {identifier}");
    assert_eq!(parts[1].len(), 4, "unexpected sequence segment: {identifier}");
    assert_eq!(parts[2].len(), 3, "unexpected checksum segment: {identifier}");
    for part in parts {
        assert!(
            part.bytes().all(|b| b.is_ascii_digit()),
            "non-digit segment: {identifier}"
        );
    }
}
