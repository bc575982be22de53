// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between stored rows and domain values.

use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{application_history, applications, notifications};
use crate::error::PersistenceError;
use enrolink_audit::{Actor, HistoryEntry};
use enrolink_domain::{AccountId, Application, Notification};

/// A repair the backfill applies to one application's credentials.
///
/// The temporary password arrives in plaintext and is hashed on write.
/// `seed_permanent` stores the same value as the permanent password for
/// records that never had one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRepair {
    pub application_id: i64,
    pub temp_password: String,
    pub seed_permanent: bool,
}

/// Formats the current UTC instant as an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn now_utc_rfc3339() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Hashes a plaintext credential for storage.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_credential(plaintext: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}

/// Diesel Queryable struct for application rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = applications)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub guardian_name: Option<String>,
    pub contact_number: Option<String>,
    pub program: Option<String>,
    pub status: String,
    pub account_identifier: Option<String>,
    pub rejection_remarks: Option<String>,
    pub password_hash: Option<String>,
    pub temp_password_hash: Option<String>,
    pub temp_password_active: i32,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl ApplicationRow {
    /// Converts a stored row into the domain application.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if the status label or account
    /// identifier cannot be parsed.
    pub fn into_domain(self) -> Result<Application, PersistenceError> {
        let status = self
            .status
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
        let account_id: Option<AccountId> = self
            .account_identifier
            .as_deref()
            .map(AccountId::parse)
            .transpose()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;

        Ok(Application {
            application_id: self.application_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            guardian_name: self.guardian_name,
            contact_number: self.contact_number,
            program: self.program,
            status,
            account_id,
            rejection_remarks: self.rejection_remarks,
            password_hash: self.password_hash,
            temp_password_hash: self.temp_password_hash,
            temp_password_active: self.temp_password_active != 0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Diesel Insertable struct for new application rows.
#[derive(Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplicationRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub guardian_name: Option<&'a str>,
    pub contact_number: Option<&'a str>,
    pub program: Option<&'a str>,
    pub status: &'a str,
    pub account_identifier: Option<String>,
    pub rejection_remarks: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub temp_password_hash: Option<&'a str>,
    pub temp_password_active: i32,
    pub created_at: &'a str,
}

/// Diesel Queryable struct for history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = application_history)]
pub struct HistoryRow {
    pub entry_id: i64,
    pub application_id: i64,
    pub status: String,
    pub remarks: Option<String>,
    pub actor_id: String,
    pub actor_display_name: String,
    pub recorded_at: String,
}

impl HistoryRow {
    /// Converts a stored row into the audit history entry.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if the stored status is not a
    /// decision.
    pub fn into_domain(self) -> Result<HistoryEntry, PersistenceError> {
        let status = self
            .status
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
        Ok(HistoryEntry::with_id(
            self.entry_id,
            self.application_id,
            status,
            self.remarks,
            Actor::new(self.actor_id, self.actor_display_name),
            self.recorded_at,
        ))
    }
}

/// Diesel Insertable struct for new history rows.
#[derive(Insertable)]
#[diesel(table_name = application_history)]
pub struct NewHistoryRow<'a> {
    pub application_id: i64,
    pub status: &'a str,
    pub remarks: Option<&'a str>,
    pub actor_id: &'a str,
    pub actor_display_name: &'a str,
    pub recorded_at: &'a str,
}

/// Diesel Queryable struct for notification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
pub struct NotificationRow {
    pub notification_id: i64,
    pub application_id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub is_read: i32,
    pub related_event_id: Option<i64>,
    pub created_at: String,
}

impl NotificationRow {
    /// Converts a stored row into the domain notification.
    ///
    /// # Errors
    ///
    /// Returns a `ReconstructionError` if the kind label is unknown.
    pub fn into_domain(self) -> Result<Notification, PersistenceError> {
        let kind = self
            .kind
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
        Ok(Notification {
            notification_id: self.notification_id,
            application_id: self.application_id,
            kind,
            title: self.title,
            message: self.message,
            read: self.is_read != 0,
            related_event_id: self.related_event_id,
            created_at: self.created_at,
        })
    }
}

/// Diesel Insertable struct for new notification rows.
#[derive(Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow<'a> {
    pub application_id: i64,
    pub kind: &'a str,
    pub title: &'a str,
    pub message: &'a str,
    pub is_read: i32,
    pub related_event_id: Option<i64>,
    pub created_at: &'a str,
}
