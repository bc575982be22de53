// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Enrolink student system.
//!
//! Every operation takes an explicit acting principal; there is no
//! ambient session state. Authorization is a precondition check at this
//! boundary, the core below never consults it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod backfill;
mod credentials;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use backfill::run_backfill;
pub use credentials::TempPasswordGenerator;
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use request_response::{
    DecideApplicationRequest, DecideApplicationResponse, DeactivateApplicationRequest,
    DeactivateApplicationResponse, HistoryEntryView, ListHistoryResponse,
    ListNotificationsResponse, NotificationView, PublishCalendarEventRequest,
    PublishCalendarEventResponse, SubmitApplicationRequest, SubmitApplicationResponse,
    UnreadCountResponse,
};

use time::OffsetDateTime;
use tracing::{info, warn};

use enrolink::{Command, TransitionOutcome, TransitionResult, apply, calendar_event_notification};
use enrolink_audit::Actor;
use enrolink_domain::{Application, CalendarEvent, Decision, NotificationDraft};
use enrolink_persistence::Persistence;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: admissions staff with decision and corrective
    /// authority.
    ///
    /// Admins may decide applications, deactivate them, publish
    /// calendar events, and read any history or notifications.
    Admin,
    /// Applicant role: a student acting on their own application.
    ///
    /// Applicants may submit their own application and read, flag, or
    /// delete their own notifications.
    Applicant,
}

impl Role {
    /// Returns the display name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Applicant => "Applicant",
        }
    }
}

/// An authenticated actor with an associated role.
///
/// For applicants, `id` is the decimal form of their own application id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The actor's display name.
    pub display_name: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, display_name: String, role: Role) -> Self {
        Self {
            id,
            display_name,
            role,
        }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording history entries to attribute
    /// decisions to the acting administrator.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.display_name.clone())
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Applicant => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks that an actor may decide applications.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_decide(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "decide_application")
    }

    /// Checks that an actor may deactivate applications.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_deactivate(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "deactivate_application")
    }

    /// Checks that an actor may publish calendar events.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_publish_event(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "publish_calendar_event")
    }

    /// Checks that an actor may read an application's decision history.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_history(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "list_history")
    }

    /// Checks that an actor may act on the given application: admins
    /// always, applicants only on their own.
    ///
    /// # Errors
    ///
    /// Returns an error if an applicant targets another application.
    pub fn authorize_own_application(
        actor: &AuthenticatedActor,
        application_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Applicant if actor.id == application_id.to_string() => Ok(()),
            Role::Applicant => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// Submits an application for admissions review.
///
/// Legal from the registered state and from a prior rejection
/// (resubmission); a resubmission clears the stored rejection remarks.
/// Submitting an already pending application is a no-op.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is neither an admin nor the applicant themselves
/// - The application does not exist
/// - The transition is not permitted (already approved or deactivated)
pub fn submit_application(
    persistence: &mut Persistence,
    request: &SubmitApplicationRequest,
    actor: &AuthenticatedActor,
) -> Result<SubmitApplicationResponse, ApiError> {
    AuthorizationService::authorize_own_application(
        actor,
        request.application_id,
        "submit_application",
    )?;

    let application: Application = persistence.find_application(request.application_id)?;
    let result: TransitionResult = apply(
        &application,
        Command::Submit,
        &actor.to_audit_actor(),
        OffsetDateTime::now_utc().date(),
        persistence,
        &TempPasswordGenerator::new(),
    )
    .map_err(translate_core_error)?;

    let message: String = match result.outcome {
        TransitionOutcome::Applied { .. } => {
            persistence.save_application(&result.application)?;
            String::from("Application submitted for review")
        }
        TransitionOutcome::Unchanged => String::from("Application is already awaiting review"),
    };

    Ok(SubmitApplicationResponse {
        application_id: request.application_id,
        status: result.application.status.to_string(),
        message,
    })
}

/// Decides an application: approves or rejects it.
///
/// The status change, identifier assignment, name normalization, and
/// credential issuance commit as one unit. The history entry and the
/// notification are appended afterwards, best-effort: their failure is
/// logged and never rolls back the committed decision. Re-issuing the
/// current decision is a no-op with no side effects.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The decision label is invalid
/// - The application does not exist
/// - The transition is not permitted
/// - The atomic commit fails (the caller may retry the whole call)
pub fn decide_application(
    persistence: &mut Persistence,
    request: &DecideApplicationRequest,
    actor: &AuthenticatedActor,
) -> Result<DecideApplicationResponse, ApiError> {
    AuthorizationService::authorize_decide(actor)?;

    let decision: Decision = request
        .decision
        .parse()
        .map_err(translate_domain_error)?;
    let application: Application = persistence.find_application(request.application_id)?;

    let result: TransitionResult = apply(
        &application,
        Command::Decide {
            decision,
            remarks: request.remarks.clone(),
        },
        &actor.to_audit_actor(),
        OffsetDateTime::now_utc().date(),
        persistence,
        &TempPasswordGenerator::new(),
    )
    .map_err(translate_core_error)?;

    let message: String = match result.outcome {
        TransitionOutcome::Applied { .. } => {
            persistence
                .commit_decision(&result.application, result.issued_credential.as_deref())?;
            append_follow_on_effects(persistence, &result);
            format!("Application {}", decision.status().humanized())
        }
        TransitionOutcome::Unchanged => {
            format!("Application is already {}", decision.status().humanized())
        }
    };

    Ok(DecideApplicationResponse {
        application_id: request.application_id,
        status: result.application.status.to_string(),
        account_identifier: result
            .application
            .account_id
            .as_ref()
            .map(ToString::to_string),
        message,
    })
}

/// Appends the decoupled side effects of a committed decision.
///
/// Failures here are logged and swallowed; the decision is already
/// committed and a corrective administrative action can re-trigger
/// delivery.
fn append_follow_on_effects(persistence: &mut Persistence, result: &TransitionResult) {
    if let Some(entry) = &result.history_entry
        && let Err(e) = persistence.append_history(entry)
    {
        warn!(
            application_id = entry.application_id,
            error = %e,
            "history append failed after committed decision"
        );
    }
    if let Some(draft) = &result.notification
        && let Err(e) = persistence.append_notification(draft)
    {
        warn!(
            application_id = draft.application_id,
            error = %e,
            "notification dispatch failed after committed decision"
        );
    }
}

/// Deactivates an application.
///
/// Reachable from any state; keeps an already-assigned account
/// identifier and produces neither history entry nor notification.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the application
/// does not exist.
pub fn deactivate_application(
    persistence: &mut Persistence,
    request: &DeactivateApplicationRequest,
    actor: &AuthenticatedActor,
) -> Result<DeactivateApplicationResponse, ApiError> {
    AuthorizationService::authorize_deactivate(actor)?;

    let application: Application = persistence.find_application(request.application_id)?;
    let result: TransitionResult = apply(
        &application,
        Command::Deactivate,
        &actor.to_audit_actor(),
        OffsetDateTime::now_utc().date(),
        persistence,
        &TempPasswordGenerator::new(),
    )
    .map_err(translate_core_error)?;

    let message: String = match result.outcome {
        TransitionOutcome::Applied { .. } => {
            persistence.save_application(&result.application)?;
            String::from("Application deactivated")
        }
        TransitionOutcome::Unchanged => String::from("Application is already inactive"),
    };

    Ok(DeactivateApplicationResponse {
        application_id: request.application_id,
        status: result.application.status.to_string(),
        message,
    })
}

/// Publishes a calendar event: one unread notification per application
/// not in the inactive status, inserted as one batch.
///
/// The fan-out is O(active applicant count); event publication is an
/// infrequent administrative action.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the event dates are
/// invalid, or the batch insert fails.
pub fn publish_calendar_event(
    persistence: &mut Persistence,
    request: PublishCalendarEventRequest,
    actor: &AuthenticatedActor,
) -> Result<PublishCalendarEventResponse, ApiError> {
    AuthorizationService::authorize_publish_event(actor)?;

    let event: CalendarEvent = CalendarEvent::new(
        request.event_id,
        request.title,
        request.starts_on,
        request.ends_on,
        request.description,
    )
    .map_err(translate_domain_error)?;

    let recipients: Vec<Application> = persistence.list_active_applications()?;
    let drafts: Vec<NotificationDraft> = recipients
        .iter()
        .map(|application| calendar_event_notification(&event, application.application_id))
        .collect();

    let inserted: usize = persistence.append_notifications(&drafts)?;
    info!(
        event_id = event.event_id(),
        recipients = inserted,
        "published calendar event to active applicants"
    );

    Ok(PublishCalendarEventResponse {
        event_id: event.event_id(),
        recipients: inserted,
        message: format!("Notified {inserted} applicants"),
    })
}

/// Lists the decision history for an application, oldest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the application
/// does not exist.
pub fn list_history(
    persistence: &mut Persistence,
    application_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ListHistoryResponse, ApiError> {
    AuthorizationService::authorize_history(actor)?;

    // Surface a missing application as not-found rather than an empty list.
    persistence.find_application(application_id)?;

    let entries: Vec<HistoryEntryView> = persistence
        .list_history(application_id)?
        .into_iter()
        .map(|entry| HistoryEntryView {
            entry_id: entry.entry_id.unwrap_or_default(),
            status: entry.status.as_str().to_string(),
            remarks: entry.remarks,
            decided_by: entry.actor.display_name,
            recorded_at: entry.recorded_at.unwrap_or_default(),
        })
        .collect();

    Ok(ListHistoryResponse {
        application_id,
        entries,
    })
}

/// Lists an application's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the actor may not read this application's
/// notifications or the application does not exist.
pub fn list_notifications(
    persistence: &mut Persistence,
    application_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ListNotificationsResponse, ApiError> {
    AuthorizationService::authorize_own_application(actor, application_id, "list_notifications")?;

    persistence.find_application(application_id)?;

    let notifications: Vec<NotificationView> = persistence
        .list_notifications(application_id)?
        .into_iter()
        .map(|notification| NotificationView {
            notification_id: notification.notification_id,
            kind: notification.kind.as_str().to_string(),
            title: notification.title,
            message: notification.message,
            read: notification.read,
            related_event_id: notification.related_event_id,
            created_at: notification.created_at,
        })
        .collect();

    Ok(ListNotificationsResponse {
        application_id,
        notifications,
    })
}

/// Counts an application's unread notifications.
///
/// # Errors
///
/// Returns an error if the actor may not read this application's
/// notifications.
pub fn unread_count(
    persistence: &mut Persistence,
    application_id: i64,
    actor: &AuthenticatedActor,
) -> Result<UnreadCountResponse, ApiError> {
    AuthorizationService::authorize_own_application(actor, application_id, "unread_count")?;

    let count: i64 = persistence.count_unread(application_id)?;
    Ok(UnreadCountResponse {
        application_id,
        count,
    })
}

/// Marks a notification read. Returns whether a row matched; a miss is
/// not an error.
///
/// # Errors
///
/// Returns an error if the actor may not act on this application's
/// notifications or the update fails.
pub fn mark_notification_read(
    persistence: &mut Persistence,
    notification_id: i64,
    application_id: i64,
    actor: &AuthenticatedActor,
) -> Result<bool, ApiError> {
    AuthorizationService::authorize_own_application(
        actor,
        application_id,
        "mark_notification_read",
    )?;
    Ok(persistence.set_notification_read(notification_id, application_id, true)?)
}

/// Marks a notification unread. Returns whether a row matched; a miss
/// is not an error.
///
/// # Errors
///
/// Returns an error if the actor may not act on this application's
/// notifications or the update fails.
pub fn mark_notification_unread(
    persistence: &mut Persistence,
    notification_id: i64,
    application_id: i64,
    actor: &AuthenticatedActor,
) -> Result<bool, ApiError> {
    AuthorizationService::authorize_own_application(
        actor,
        application_id,
        "mark_notification_unread",
    )?;
    Ok(persistence.set_notification_read(notification_id, application_id, false)?)
}

/// Deletes a notification. Returns whether a row matched; a miss is not
/// an error.
///
/// # Errors
///
/// Returns an error if the actor may not act on this application's
/// notifications or the delete fails.
pub fn delete_notification(
    persistence: &mut Persistence,
    notification_id: i64,
    application_id: i64,
    actor: &AuthenticatedActor,
) -> Result<bool, ApiError> {
    AuthorizationService::authorize_own_application(actor, application_id, "delete_notification")?;
    Ok(persistence.delete_notification(notification_id, application_id)?)
}
