// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decision history mutations.
//!
//! The history is append-only: there is no update or delete here, and
//! the adapter exposes none.

use diesel::prelude::*;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewHistoryRow, now_utc_rfc3339};
use crate::diesel_schema::application_history;
use crate::error::PersistenceError;
use enrolink_audit::HistoryEntry;

/// Appends one immutable history entry with a server-assigned timestamp.
///
/// Returns the entry id assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_history(
    conn: &mut SqliteConnection,
    entry: &HistoryEntry,
) -> Result<i64, PersistenceError> {
    let recorded_at: String = now_utc_rfc3339()?;
    let row = NewHistoryRow {
        application_id: entry.application_id,
        status: entry.status.as_str(),
        remarks: entry.remarks.as_deref(),
        actor_id: &entry.actor.id,
        actor_display_name: &entry.actor.display_name,
        recorded_at: &recorded_at,
    };

    diesel::insert_into(application_history::table)
        .values(&row)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
