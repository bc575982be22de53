// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocator::{IdentifierDirectory, allocate};
use crate::command::Command;
use crate::credentials::CredentialIssuer;
use crate::error::CoreError;
use crate::notify::status_change_notification;
use crate::state::{TransitionOutcome, TransitionResult};
use enrolink_audit::{Actor, HistoryEntry};
use enrolink_domain::{
    Application, ApplicationStatus, Decision, TransitionRule, capitalize_first,
};
use time::Date;
use tracing::debug;

/// Applies a command to an application, producing the new application
/// and its follow-on effects.
///
/// Transition legality comes from the status transition table; this
/// function assembles the side effects of an applied transition:
///
/// - Approval allocates an account identifier iff none exists,
///   capitalizes the display names, and issues a temporary credential
///   iff no active one exists.
/// - Rejection stores the remarks on the application.
/// - Decisions produce a history entry and a notification draft.
/// - Submission and deactivation change status only.
///
/// The returned result is data; nothing is persisted here. A same-status
/// request resolves to `TransitionOutcome::Unchanged` with no side
/// effects.
///
/// # Arguments
///
/// * `application` - The application in its current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The acting principal, attributed in history entries
/// * `decided_on` - The server-side date of the action (drives the
///   identifier's year)
/// * `directory` - Identifier lookups for allocation
/// * `credentials` - Source of fresh temporary passwords
///
/// # Errors
///
/// Returns an error if:
/// - The transition is not permitted by the lifecycle table
/// - An identifier lookup fails during allocation
pub fn apply(
    application: &Application,
    command: Command,
    actor: &Actor,
    decided_on: Date,
    directory: &mut dyn IdentifierDirectory,
    credentials: &dyn CredentialIssuer,
) -> Result<TransitionResult, CoreError> {
    let target: ApplicationStatus = match &command {
        Command::Submit => ApplicationStatus::Pending,
        Command::Decide { decision, .. } => decision.status(),
        Command::Deactivate => ApplicationStatus::Inactive,
    };

    match application.status.transition_to(target) {
        TransitionRule::Deny(reason) => {
            Err(CoreError::DomainViolation(
                application.status.denial(target, reason),
            ))
        }
        TransitionRule::Noop => {
            debug!(
                application_id = application.application_id,
                status = %application.status,
                "status unchanged, skipping side effects"
            );
            Ok(TransitionResult::unchanged(application.clone()))
        }
        TransitionRule::Apply => {
            let from: ApplicationStatus = application.status;
            match command {
                Command::Submit => Ok(submit(application, from)),
                Command::Decide { decision, remarks } => decide(
                    application,
                    from,
                    decision,
                    remarks,
                    actor,
                    decided_on,
                    directory,
                    credentials,
                ),
                Command::Deactivate => Ok(deactivate(application, from)),
            }
        }
    }
}

/// Submission for review. Clears remarks from a prior rejection: a
/// resubmitted application starts a fresh cycle (the history keeps the
/// original text).
fn submit(application: &Application, from: ApplicationStatus) -> TransitionResult {
    let mut updated: Application = application.clone();
    updated.status = ApplicationStatus::Pending;
    updated.rejection_remarks = None;

    TransitionResult {
        application: updated,
        outcome: TransitionOutcome::Applied {
            from,
            to: ApplicationStatus::Pending,
        },
        history_entry: None,
        notification: None,
        issued_credential: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn decide(
    application: &Application,
    from: ApplicationStatus,
    decision: Decision,
    remarks: Option<String>,
    actor: &Actor,
    decided_on: Date,
    directory: &mut dyn IdentifierDirectory,
    credentials: &dyn CredentialIssuer,
) -> Result<TransitionResult, CoreError> {
    let remarks: Option<String> = remarks
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from);

    let mut updated: Application = application.clone();
    updated.status = decision.status();

    let mut issued_credential: Option<String> = None;
    match decision {
        Decision::Approved => {
            // Assigned exactly once; a decision revision never reallocates.
            if updated.account_id.is_none() {
                updated.account_id = Some(allocate(directory, decided_on)?);
            }
            updated.first_name = capitalize_first(&updated.first_name);
            updated.last_name = capitalize_first(&updated.last_name);
            if !updated.has_active_temp_credential() {
                issued_credential = Some(credentials.issue());
                updated.temp_password_active = true;
            }
            // Remarks belong to a rejection; a revised decision drops them.
            updated.rejection_remarks = None;
        }
        Decision::Rejected => {
            updated.rejection_remarks = remarks.clone();
        }
    }

    let history_entry: HistoryEntry = HistoryEntry::new(
        updated.application_id,
        decision,
        remarks.clone(),
        actor.clone(),
    );
    let notification = status_change_notification(
        updated.application_id,
        decision.status(),
        remarks.as_deref(),
    );

    Ok(TransitionResult {
        application: updated,
        outcome: TransitionOutcome::Applied {
            from,
            to: decision.status(),
        },
        history_entry: Some(history_entry),
        notification: Some(notification),
        issued_credential,
    })
}

/// Administrative deactivation. Keeps an already-assigned identifier and
/// produces neither history entry nor notification.
fn deactivate(application: &Application, from: ApplicationStatus) -> TransitionResult {
    let mut updated: Application = application.clone();
    updated.status = ApplicationStatus::Inactive;

    TransitionResult {
        application: updated,
        outcome: TransitionOutcome::Applied {
            from,
            to: ApplicationStatus::Inactive,
        },
        history_entry: None,
        notification: None,
        issued_credential: None,
    }
}
