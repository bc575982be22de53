// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use enrolink_audit::HistoryEntry;
use enrolink_domain::{Application, ApplicationStatus, NotificationDraft};

/// How a transition request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The status changed.
    Applied {
        /// The status before the transition.
        from: ApplicationStatus,
        /// The status after the transition.
        to: ApplicationStatus,
    },
    /// Same-status request: nothing changed and no side effects were
    /// produced.
    Unchanged,
}

/// The result of a successful transition request.
///
/// The status change itself is atomic: the caller persists `application`
/// (and the issued credential) as one unit, or not at all. The history
/// entry and notification are decoupled follow-on effects; the caller
/// appends them after the commit and tolerates their failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The application after the transition.
    pub application: Application,
    /// Whether the request changed anything.
    pub outcome: TransitionOutcome,
    /// The audit entry for an applied decision, if one is due.
    pub history_entry: Option<HistoryEntry>,
    /// The notification draft for an applied decision, if one is due.
    pub notification: Option<NotificationDraft>,
    /// A newly issued temporary password, in plaintext. Hashed and stored
    /// by the persistence layer inside the commit transaction.
    pub issued_credential: Option<String>,
}

impl TransitionResult {
    /// Builds the result for a guarded no-op request.
    #[must_use]
    pub const fn unchanged(application: Application) -> Self {
        Self {
            application,
            outcome: TransitionOutcome::Unchanged,
            history_entry: None,
            notification: None,
            issued_credential: None,
        }
    }
}
