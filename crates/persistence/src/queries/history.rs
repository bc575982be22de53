// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decision history queries.

use diesel::prelude::*;

use crate::data_models::HistoryRow;
use crate::diesel_schema::application_history;
use crate::error::PersistenceError;
use enrolink_audit::HistoryEntry;

/// Lists the decision history for an application, oldest first.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn list_history(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = application_history::table
        .filter(application_history::application_id.eq(application_id))
        .order(application_history::entry_id.asc())
        .select(HistoryRow::as_select())
        .load(conn)?;

    rows.into_iter().map(HistoryRow::into_domain).collect()
}
