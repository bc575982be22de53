// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Status label is not one of the enumerated states.
    InvalidStatus(String),
    /// Decision label is neither APPROVED nor REJECTED.
    InvalidDecision(String),
    /// Notification kind label is unknown.
    InvalidNotificationKind(String),
    /// The requested status transition is not permitted.
    InvalidTransition {
        /// The current status label.
        from: &'static str,
        /// The requested status label.
        to: &'static str,
        /// Why the transition is not permitted.
        reason: &'static str,
    },
    /// Account identifier string does not match the expected layout.
    InvalidIdentifier {
        /// The identifier that failed to parse.
        identifier: String,
        /// Description of the failed check.
        reason: String,
    },
    /// A required name field is empty or invalid.
    InvalidName(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Calendar event title is empty.
    InvalidEventTitle,
    /// Calendar event end date precedes its start date.
    InvalidEventDates {
        /// The event start date.
        starts_on: time::Date,
        /// The event end date.
        ends_on: time::Date,
    },
    /// Profile fields cannot be edited while the application is under review.
    ProfileLocked {
        /// The application whose profile is locked.
        application_id: i64,
    },
    /// Application does not exist.
    ApplicationNotFound(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(label) => write!(f, "Invalid application status '{label}'"),
            Self::InvalidDecision(label) => {
                write!(f, "Invalid decision '{label}': must be APPROVED or REJECTED")
            }
            Self::InvalidNotificationKind(label) => {
                write!(f, "Invalid notification kind '{label}'")
            }
            Self::InvalidTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::InvalidIdentifier { identifier, reason } => {
                write!(f, "Invalid account identifier '{identifier}': {reason}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidEventTitle => write!(f, "Calendar event title cannot be empty"),
            Self::InvalidEventDates { starts_on, ends_on } => {
                write!(
                    f,
                    "Calendar event end date {ends_on} cannot be before start date {starts_on}"
                )
            }
            Self::ProfileLocked { application_id } => {
                write!(
                    f,
                    "Application {application_id} is under review and cannot be edited"
                )
            }
            Self::ApplicationNotFound(id) => write!(f, "Application {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
