// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application queries, including the identifier-directory lookups the
//! allocator depends on.

use diesel::prelude::*;

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use enrolink_domain::{Application, ApplicationStatus};

/// Retrieves an application by its surrogate key.
///
/// # Errors
///
/// Returns `ApplicationNotFound` if no row matches, or a database error.
pub fn find_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Application, PersistenceError> {
    let result = applications::table
        .filter(applications::application_id.eq(application_id))
        .select(ApplicationRow::as_select())
        .first::<ApplicationRow>(conn);

    match result {
        Ok(row) => row.into_domain(),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::ApplicationNotFound(application_id))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every application not in the inactive status, ordered by id.
///
/// This is the recipient set for calendar fan-out.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn list_active_applications(
    conn: &mut SqliteConnection,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::status.ne(ApplicationStatus::Inactive.as_str()))
        .order(applications::application_id.asc())
        .select(ApplicationRow::as_select())
        .load(conn)?;

    rows.into_iter().map(ApplicationRow::into_domain).collect()
}

/// Lists every approved application, ordered by id.
///
/// This is the candidate set for the credential backfill.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn list_approved_applications(
    conn: &mut SqliteConnection,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::status.eq(ApplicationStatus::Approved.as_str()))
        .order(applications::application_id.asc())
        .select(ApplicationRow::as_select())
        .load(conn)?;

    rows.into_iter().map(ApplicationRow::into_domain).collect()
}

/// Returns the lexicographically greatest assigned account identifier
/// with the given prefix, if any.
///
/// Identifiers of one year share a fixed-width layout, so lexicographic
/// and numeric ordering agree within a prefix.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn latest_identifier_with_prefix(
    conn: &mut SqliteConnection,
    prefix: &str,
) -> Result<Option<String>, PersistenceError> {
    let pattern: String = format!("{}%", prefix.replace('%', "").replace('_', ""));
    let latest: Option<String> = applications::table
        .filter(applications::account_identifier.like(pattern))
        .select(diesel::dsl::max(applications::account_identifier))
        .first::<Option<String>>(conn)?;
    Ok(latest)
}

/// Whether the exact identifier string is already assigned.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn identifier_exists(
    conn: &mut SqliteConnection,
    identifier: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = applications::table
        .filter(applications::account_identifier.eq(identifier))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Verifies a login candidate against the stored credential pair.
///
/// While a temporary credential is active it is checked first; the
/// permanent credential is accepted otherwise. Comparison is by salted
/// hash, never by plaintext equality.
///
/// # Errors
///
/// Returns an error if the application is missing or the query fails.
pub fn verify_login(
    conn: &mut SqliteConnection,
    application_id: i64,
    candidate: &str,
) -> Result<bool, PersistenceError> {
    let application: Application = find_application(conn, application_id)?;

    if application.status == ApplicationStatus::Inactive {
        return Ok(false);
    }

    if application.temp_password_active
        && let Some(temp_hash) = application.temp_password_hash.as_deref()
        && !temp_hash.is_empty()
        && bcrypt::verify(candidate, temp_hash).unwrap_or(false)
    {
        return Ok(true);
    }

    match application.password_hash.as_deref() {
        Some(hash) if !hash.is_empty() => Ok(bcrypt::verify(candidate, hash).unwrap_or(false)),
        _ => Ok(false),
    }
}
