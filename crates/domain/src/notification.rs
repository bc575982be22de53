// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification records and calendar event values.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The kind of event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// An admission decision on the recipient's application.
    ApplicationStatus,
    /// A published calendar event broadcast to active applicants.
    CalendarEvent,
}

impl NotificationKind {
    /// Returns the persisted string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationStatus => "APPLICATION_STATUS",
            Self::CalendarEvent => "CALENDAR_EVENT",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPLICATION_STATUS" => Ok(Self::ApplicationStatus),
            "CALENDAR_EVENT" => Ok(Self::CalendarEvent),
            _ => Err(DomainError::InvalidNotificationKind(s.to_string())),
        }
    }
}

/// A notification that has not been persisted yet.
///
/// Drafts are produced by transitions and calendar fan-out; the database
/// assigns the id, the unread flag, and the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    /// The recipient application.
    pub application_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// The calendar event this notification refers to, if any.
    pub related_event_id: Option<i64>,
}

/// A stored notification.
///
/// Mutated only by the recipient (read flag toggle, delete), never by
/// the dispatcher after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i64,
    pub application_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub related_event_id: Option<i64>,
    pub created_at: String,
}

/// A published calendar event, as handed over by the catalog collaborator.
///
/// Events are consumed as values; their storage belongs to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    event_id: i64,
    title: String,
    starts_on: Date,
    ends_on: Date,
    description: Option<String>,
}

impl CalendarEvent {
    /// Creates a validated calendar event.
    ///
    /// A missing end date collapses to a single-day event.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty or the end date precedes
    /// the start date.
    pub fn new(
        event_id: i64,
        title: String,
        starts_on: Date,
        ends_on: Option<Date>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::InvalidEventTitle);
        }
        let ends_on: Date = ends_on.unwrap_or(starts_on);
        if ends_on < starts_on {
            return Err(DomainError::InvalidEventDates { starts_on, ends_on });
        }
        Ok(Self {
            event_id,
            title,
            starts_on,
            ends_on,
            description,
        })
    }

    #[must_use]
    pub const fn event_id(&self) -> i64 {
        self.event_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn starts_on(&self) -> Date {
        self.starts_on
    }

    #[must_use]
    pub const fn ends_on(&self) -> Date {
        self.ends_on
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the event covers a single day.
    #[must_use]
    pub fn single_day(&self) -> bool {
        self.starts_on == self.ends_on
    }
}
