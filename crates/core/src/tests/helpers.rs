// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fakes and fixtures.

use crate::allocator::IdentifierDirectory;
use crate::credentials::CredentialIssuer;
use crate::error::StoreError;
use enrolink_audit::Actor;
use enrolink_domain::{Application, ApplicationStatus};

/// In-memory identifier directory.
///
/// `taken` holds committed identifiers; `latest` optionally overrides the
/// prefix lookup so tests can simulate a stale or malformed "latest" row.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    pub taken: Vec<String>,
    pub latest_override: Option<String>,
    pub fail: bool,
}

impl FakeDirectory {
    pub fn with_taken(taken: &[&str]) -> Self {
        Self {
            taken: taken.iter().map(ToString::to_string).collect(),
            latest_override: None,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            taken: Vec::new(),
            latest_override: None,
            fail: true,
        }
    }
}

impl IdentifierDirectory for FakeDirectory {
    fn latest_with_prefix(&mut self, prefix: &str) -> Result<Option<String>, StoreError> {
        if self.fail {
            return Err(StoreError(String::from("directory unavailable")));
        }
        if let Some(latest) = &self.latest_override {
            return Ok(Some(latest.clone()));
        }
        Ok(self
            .taken
            .iter()
            .filter(|id| id.starts_with(prefix))
            .max()
            .cloned())
    }

    fn identifier_exists(&mut self, identifier: &str) -> Result<bool, StoreError> {
        if self.fail {
            return Err(StoreError(String::from("directory unavailable")));
        }
        Ok(self.taken.iter().any(|id| id == identifier))
    }
}

/// Issues the same password every time, keeping transitions deterministic.
pub struct FixedIssuer(pub &'static str);

impl CredentialIssuer for FixedIssuer {
    fn issue(&self) -> String {
        self.0.to_string()
    }
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("Dean Rivera"))
}

pub fn create_test_application(status: ApplicationStatus) -> Application {
    let mut app: Application = Application::new(
        42,
        String::from("juan"),
        String::from("dela cruz"),
        String::from("juan@example.edu"),
        String::from("2026-07-01T00:00:00Z"),
    );
    app.status = status;
    app
}
