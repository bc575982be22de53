// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification queries.

use diesel::prelude::*;

use crate::data_models::NotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use enrolink_domain::Notification;

/// Lists an application's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn list_notifications(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Vec<Notification>, PersistenceError> {
    let rows: Vec<NotificationRow> = notifications::table
        .filter(notifications::application_id.eq(application_id))
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.desc(),
        ))
        .select(NotificationRow::as_select())
        .load(conn)?;

    rows.into_iter().map(NotificationRow::into_domain).collect()
}

/// Counts an application's unread notifications.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_unread(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<i64, PersistenceError> {
    let count: i64 = notifications::table
        .filter(notifications::application_id.eq(application_id))
        .filter(notifications::is_read.eq(0))
        .count()
        .get_result(conn)?;
    Ok(count)
}
