// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Enrolink student system.
//!
//! This crate provides database persistence for applications, decision
//! history, and notifications. It is built on Diesel over SQLite with
//! embedded migrations.
//!
//! In-memory databases (used by unit and integration tests) receive a
//! unique shared-cache name per call via an atomic counter, giving
//! deterministic test isolation. File-backed databases run in WAL mode
//! for better read concurrency. Foreign key enforcement is verified at
//! startup.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use enrolink::{IdentifierDirectory, StoreError};
use enrolink_audit::HistoryEntry;
use enrolink_domain::{Application, Notification, NotificationDraft};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::CredentialRepair;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, which
/// eliminates time-based collisions between concurrently running tests.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the admission lifecycle.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory SQLite
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based SQLite
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the SQLite database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Applications
    // ========================================================================

    /// Inserts a new application row and returns it as stored, with the
    /// database-assigned surrogate key.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_application(
        &mut self,
        application: &Application,
    ) -> Result<Application, PersistenceError> {
        let application_id: i64 =
            mutations::applications::insert_application(&mut self.conn, application)?;
        queries::applications::find_application(&mut self.conn, application_id)
    }

    /// Retrieves an application by id.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationNotFound` if no row matches.
    pub fn find_application(
        &mut self,
        application_id: i64,
    ) -> Result<Application, PersistenceError> {
        queries::applications::find_application(&mut self.conn, application_id)
    }

    /// Updates an application row (profile and status fields).
    ///
    /// # Errors
    ///
    /// Returns `ApplicationNotFound` if no row matches.
    pub fn save_application(&mut self, application: &Application) -> Result<(), PersistenceError> {
        mutations::applications::save_application(&mut self.conn, application)
    }

    /// Commits a decided transition atomically: status, identifier,
    /// remarks, normalized names, and any newly issued temporary
    /// credential (hashed here).
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails; nothing is persisted then.
    pub fn commit_decision(
        &mut self,
        application: &Application,
        issued_credential: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::applications::commit_decision(&mut self.conn, application, issued_credential)
    }

    /// Lists every application not in the inactive status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_applications(&mut self) -> Result<Vec<Application>, PersistenceError> {
        queries::applications::list_active_applications(&mut self.conn)
    }

    /// Lists every approved application.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_approved_applications(&mut self) -> Result<Vec<Application>, PersistenceError> {
        queries::applications::list_approved_applications(&mut self.conn)
    }

    /// Applies a batch of credential repairs in one transaction and
    /// returns the repaired count.
    ///
    /// # Errors
    ///
    /// Returns an error if any repair fails; nothing is persisted then.
    pub fn batch_apply_credential_repairs(
        &mut self,
        repairs: &[CredentialRepair],
    ) -> Result<usize, PersistenceError> {
        mutations::applications::batch_apply_credential_repairs(&mut self.conn, repairs)
    }

    /// Verifies a login candidate against the stored credential pair
    /// (temporary first while active, then permanent).
    ///
    /// # Errors
    ///
    /// Returns an error if the application is missing or the query fails.
    pub fn verify_login(
        &mut self,
        application_id: i64,
        candidate: &str,
    ) -> Result<bool, PersistenceError> {
        queries::applications::verify_login(&mut self.conn, application_id, candidate)
    }

    // ========================================================================
    // Account identifiers
    // ========================================================================

    /// Returns the greatest assigned identifier with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn latest_identifier_with_prefix(
        &mut self,
        prefix: &str,
    ) -> Result<Option<String>, PersistenceError> {
        queries::applications::latest_identifier_with_prefix(&mut self.conn, prefix)
    }

    /// Whether the exact identifier string is already assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn identifier_exists(&mut self, identifier: &str) -> Result<bool, PersistenceError> {
        queries::applications::identifier_exists(&mut self.conn, identifier)
    }

    // ========================================================================
    // Decision history
    // ========================================================================

    /// Appends one immutable history entry and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_history(&mut self, entry: &HistoryEntry) -> Result<i64, PersistenceError> {
        mutations::history::append_history(&mut self.conn, entry)
    }

    /// Lists the decision history for an application, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_history(
        &mut self,
        application_id: i64,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::history::list_history(&mut self.conn, application_id)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Appends one unread notification and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_notification(
        &mut self,
        draft: &NotificationDraft,
    ) -> Result<i64, PersistenceError> {
        mutations::notifications::append_notification(&mut self.conn, draft)
    }

    /// Appends a batch of unread notifications in one transaction and
    /// returns the inserted count.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is persisted then.
    pub fn append_notifications(
        &mut self,
        drafts: &[NotificationDraft],
    ) -> Result<usize, PersistenceError> {
        mutations::notifications::append_notifications(&mut self.conn, drafts)
    }

    /// Lists an application's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notifications(
        &mut self,
        application_id: i64,
    ) -> Result<Vec<Notification>, PersistenceError> {
        queries::notifications::list_notifications(&mut self.conn, application_id)
    }

    /// Counts an application's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_unread(&mut self, application_id: i64) -> Result<i64, PersistenceError> {
        queries::notifications::count_unread(&mut self.conn, application_id)
    }

    /// Sets the read flag of a notification, scoped to its recipient.
    /// Returns whether a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_notification_read(
        &mut self,
        notification_id: i64,
        application_id: i64,
        read: bool,
    ) -> Result<bool, PersistenceError> {
        mutations::notifications::set_notification_read(
            &mut self.conn,
            notification_id,
            application_id,
            read,
        )
    }

    /// Deletes a notification, scoped to its recipient. Returns whether
    /// a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_notification(
        &mut self,
        notification_id: i64,
        application_id: i64,
    ) -> Result<bool, PersistenceError> {
        mutations::notifications::delete_notification(
            &mut self.conn,
            notification_id,
            application_id,
        )
    }
}

impl IdentifierDirectory for Persistence {
    fn latest_with_prefix(&mut self, prefix: &str) -> Result<Option<String>, StoreError> {
        queries::applications::latest_identifier_with_prefix(&mut self.conn, prefix)
            .map_err(|e| StoreError(e.to_string()))
    }

    fn identifier_exists(&mut self, identifier: &str) -> Result<bool, StoreError> {
        queries::applications::identifier_exists(&mut self.conn, identifier)
            .map_err(|e| StoreError(e.to_string()))
    }
}
