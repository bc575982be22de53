// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the persistence crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod application_tests;

use crate::Persistence;
use enrolink_domain::{Application, ApplicationStatus};

pub fn new_persistence() -> Persistence {
    match Persistence::new_in_memory() {
        Ok(persistence) => persistence,
        Err(e) => panic!("failed to initialize in-memory database: {e}"),
    }
}

/// Inserts a fresh application with the given status and returns it as
/// stored.
pub fn seed_application(
    persistence: &mut Persistence,
    status: ApplicationStatus,
    email: &str,
) -> Application {
    let mut app: Application = Application::new(
        0,
        String::from("maria"),
        String::from("santos"),
        String::from(email),
        String::new(),
    );
    app.status = status;
    match persistence.insert_application(&app) {
        Ok(stored) => stored,
        Err(e) => panic!("failed to seed application: {e}"),
    }
}
