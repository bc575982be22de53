// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use enrolink_domain::Decision;

/// The administrator who acted on an application.
///
/// The display name is snapshotted into every history entry so the audit
/// trail stays readable after administrator accounts are renamed or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The actor's display name at the time of the action.
    pub display_name: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `display_name` - The actor's display name
    #[must_use]
    pub const fn new(id: String, display_name: String) -> Self {
        Self { id, display_name }
    }
}

/// An immutable audit record of an admission decision.
///
/// Every applied approval or rejection produces exactly one history entry.
/// Entries are never updated or deleted by normal operation. Intermediate
/// transitions (registration, submission, deactivation) are not recorded,
/// which the `status` field enforces by construction: it can only hold a
/// decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The database-assigned entry id; `None` until persisted.
    pub entry_id: Option<i64>,
    /// The application the decision was made on.
    pub application_id: i64,
    /// The resulting decision.
    pub status: Decision,
    /// Remarks captured with the decision, if any.
    pub remarks: Option<String>,
    /// The administrator who made the decision.
    pub actor: Actor,
    /// Server-assigned timestamp; `None` until persisted.
    pub recorded_at: Option<String>,
}

impl HistoryEntry {
    /// Creates a new, not-yet-persisted history entry.
    ///
    /// The entry id and timestamp are assigned by storage on append.
    #[must_use]
    pub const fn new(
        application_id: i64,
        status: Decision,
        remarks: Option<String>,
        actor: Actor,
    ) -> Self {
        Self {
            entry_id: None,
            application_id,
            status,
            remarks,
            actor,
            recorded_at: None,
        }
    }

    /// Reconstructs a persisted history entry.
    #[must_use]
    pub const fn with_id(
        entry_id: i64,
        application_id: i64,
        status: Decision,
        remarks: Option<String>,
        actor: Actor,
        recorded_at: String,
    ) -> Self {
        Self {
            entry_id: Some(entry_id),
            application_id,
            status,
            remarks,
            actor,
            recorded_at: Some(recorded_at),
        }
    }
}
