// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification mutations.
//!
//! Inserts come from the dispatcher; every mutation of an existing row
//! is scoped to the recipient application, so one applicant can never
//! touch another's notifications.

use diesel::prelude::*;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewNotificationRow, now_utc_rfc3339};
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use enrolink_domain::NotificationDraft;

/// Appends one unread notification with a server-assigned timestamp.
///
/// Returns the notification id assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_notification(
    conn: &mut SqliteConnection,
    draft: &NotificationDraft,
) -> Result<i64, PersistenceError> {
    let created_at: String = now_utc_rfc3339()?;
    let row = NewNotificationRow {
        application_id: draft.application_id,
        kind: draft.kind.as_str(),
        title: &draft.title,
        message: &draft.message,
        is_read: 0,
        related_event_id: draft.related_event_id,
        created_at: &created_at,
    };

    diesel::insert_into(notifications::table)
        .values(&row)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Appends a batch of unread notifications in one transaction.
///
/// Returns the number of inserted rows. Used by calendar fan-out, where
/// one published event produces one notification per active applicant.
///
/// # Errors
///
/// Returns an error if any insert fails; on error nothing is persisted.
pub fn append_notifications(
    conn: &mut SqliteConnection,
    drafts: &[NotificationDraft],
) -> Result<usize, PersistenceError> {
    if drafts.is_empty() {
        return Ok(0);
    }
    let created_at: String = now_utc_rfc3339()?;

    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let rows: Vec<NewNotificationRow<'_>> = drafts
            .iter()
            .map(|draft| NewNotificationRow {
                application_id: draft.application_id,
                kind: draft.kind.as_str(),
                title: &draft.title,
                message: &draft.message,
                is_read: 0,
                related_event_id: draft.related_event_id,
                created_at: &created_at,
            })
            .collect();

        let inserted: usize = diesel::insert_into(notifications::table)
            .values(&rows)
            .execute(conn)?;
        Ok(inserted)
    })
}

/// Sets the read flag of a notification, scoped to its recipient.
///
/// Returns whether a row matched; a miss is reported, not an error.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_notification_read(
    conn: &mut SqliteConnection,
    notification_id: i64,
    application_id: i64,
    read: bool,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(
        notifications::table
            .filter(notifications::notification_id.eq(notification_id))
            .filter(notifications::application_id.eq(application_id)),
    )
    .set(notifications::is_read.eq(i32::from(read)))
    .execute(conn)?;

    if updated == 0 {
        debug!(
            notification_id,
            application_id, "notification not found for recipient"
        );
    }
    Ok(updated > 0)
}

/// Deletes a notification, scoped to its recipient.
///
/// Returns whether a row matched; a miss is reported, not an error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_notification(
    conn: &mut SqliteConnection,
    notification_id: i64,
    application_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(
        notifications::table
            .filter(notifications::notification_id.eq(notification_id))
            .filter(notifications::application_id.eq(application_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        debug!(
            notification_id,
            application_id, "notification not found for recipient"
        );
    }
    Ok(deleted > 0)
}
