// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutations.
//!
//! Decision commits and credential repairs run inside a transaction:
//! either every column of the change lands, or none does. Plaintext
//! credentials are hashed here and nowhere else.

use diesel::prelude::*;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{CredentialRepair, NewApplicationRow, hash_credential, now_utc_rfc3339};
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use enrolink_domain::Application;

/// Inserts a new application row and returns the assigned surrogate key.
///
/// The caller's `application_id` is ignored; the database assigns one.
///
/// # Errors
///
/// Returns an error if the insert fails (including an email collision).
pub fn insert_application(
    conn: &mut SqliteConnection,
    application: &Application,
) -> Result<i64, PersistenceError> {
    let created_at: String = now_utc_rfc3339()?;
    let row = NewApplicationRow {
        first_name: &application.first_name,
        last_name: &application.last_name,
        email: &application.email,
        guardian_name: application.guardian_name.as_deref(),
        contact_number: application.contact_number.as_deref(),
        program: application.program.as_deref(),
        status: application.status.as_str(),
        account_identifier: application.account_id.clone().map(|id| id.to_string()),
        rejection_remarks: application.rejection_remarks.as_deref(),
        password_hash: application.password_hash.as_deref(),
        temp_password_hash: application.temp_password_hash.as_deref(),
        temp_password_active: i32::from(application.temp_password_active),
        created_at: &created_at,
    };

    diesel::insert_into(applications::table)
        .values(&row)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Updates every mutable column of an application row.
///
/// # Errors
///
/// Returns `ApplicationNotFound` if no row matches, or a database error.
pub fn save_application(
    conn: &mut SqliteConnection,
    application: &Application,
) -> Result<(), PersistenceError> {
    let updated_at: String = now_utc_rfc3339()?;
    let updated: usize = diesel::update(
        applications::table.filter(applications::application_id.eq(application.application_id)),
    )
    .set((
        applications::first_name.eq(&application.first_name),
        applications::last_name.eq(&application.last_name),
        applications::email.eq(&application.email),
        applications::guardian_name.eq(application.guardian_name.as_deref()),
        applications::contact_number.eq(application.contact_number.as_deref()),
        applications::program.eq(application.program.as_deref()),
        applications::status.eq(application.status.as_str()),
        applications::account_identifier.eq(application.account_id.clone().map(|id| id.to_string())),
        applications::rejection_remarks.eq(application.rejection_remarks.as_deref()),
        applications::updated_at.eq(Some(updated_at.as_str())),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ApplicationNotFound(
            application.application_id,
        ));
    }
    Ok(())
}

/// Commits a decided transition as one atomic unit: status, account
/// identifier, remarks, normalized names, and any newly issued temporary
/// credential.
///
/// The identifier column's uniqueness constraint is the final guard
/// against a concurrent allocation race; a violation surfaces as a
/// database error and the transaction rolls back whole.
///
/// # Errors
///
/// Returns `ApplicationNotFound` if no row matches, or a database error.
/// On error nothing is persisted.
pub fn commit_decision(
    conn: &mut SqliteConnection,
    application: &Application,
    issued_credential: Option<&str>,
) -> Result<(), PersistenceError> {
    let updated_at: String = now_utc_rfc3339()?;
    let temp_password_hash: Option<String> = issued_credential.map(hash_credential).transpose()?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(
            applications::table.filter(applications::application_id.eq(application.application_id)),
        )
        .set((
            applications::status.eq(application.status.as_str()),
            applications::account_identifier
                .eq(application.account_id.clone().map(|id| id.to_string())),
            applications::rejection_remarks.eq(application.rejection_remarks.as_deref()),
            applications::first_name.eq(&application.first_name),
            applications::last_name.eq(&application.last_name),
            applications::temp_password_active.eq(i32::from(application.temp_password_active)),
            applications::updated_at.eq(Some(updated_at.as_str())),
        ))
        .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::ApplicationNotFound(
                application.application_id,
            ));
        }

        if let Some(hash) = temp_password_hash.as_deref() {
            diesel::update(
                applications::table
                    .filter(applications::application_id.eq(application.application_id)),
            )
            .set((
                applications::temp_password_hash.eq(Some(hash)),
                applications::temp_password_active.eq(1),
            ))
            .execute(conn)?;
        }

        Ok(())
    })
}

/// Applies a batch of credential repairs in one transaction.
///
/// Returns the number of repaired rows.
///
/// # Errors
///
/// Returns an error if hashing or any update fails; on error nothing is
/// persisted.
pub fn batch_apply_credential_repairs(
    conn: &mut SqliteConnection,
    repairs: &[CredentialRepair],
) -> Result<usize, PersistenceError> {
    if repairs.is_empty() {
        return Ok(0);
    }
    let updated_at: String = now_utc_rfc3339()?;

    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let mut repaired: usize = 0;
        for repair in repairs {
            let hash: String = hash_credential(&repair.temp_password)?;

            let updated: usize = diesel::update(
                applications::table
                    .filter(applications::application_id.eq(repair.application_id)),
            )
            .set((
                applications::temp_password_hash.eq(Some(hash.as_str())),
                applications::temp_password_active.eq(1),
                applications::updated_at.eq(Some(updated_at.as_str())),
            ))
            .execute(conn)?;

            if updated == 0 {
                return Err(PersistenceError::ApplicationNotFound(repair.application_id));
            }

            if repair.seed_permanent {
                // Hash the same plaintext again: a fresh salt keeps the
                // stored values distinct, so the repaired record no longer
                // reads as undifferentiated on the next run.
                let permanent_hash: String = hash_credential(&repair.temp_password)?;
                diesel::update(
                    applications::table
                        .filter(applications::application_id.eq(repair.application_id)),
                )
                .set(applications::password_hash.eq(Some(permanent_hash.as_str())))
                .execute(conn)?;
            }

            debug!(
                application_id = repair.application_id,
                seeded_permanent = repair.seed_permanent,
                "repaired temporary credential"
            );
            repaired += 1;
        }
        Ok(repaired)
    })
}
