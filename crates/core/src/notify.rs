// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification message synthesis.
//!
//! Notifications are produced as drafts and persisted by the caller
//! after the owning transition commits, so a dispatch failure never
//! rolls back a decision.

use enrolink_domain::{
    ApplicationStatus, CalendarEvent, NotificationDraft, NotificationKind, capitalize_first,
};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Display format for calendar dates, e.g. "Jan 5, 2026".
const EVENT_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Builds the notification for an admission decision on an application.
#[must_use]
pub fn status_change_notification(
    application_id: i64,
    status: ApplicationStatus,
    remarks: Option<&str>,
) -> NotificationDraft {
    let humanized: String = status.humanized();
    let title: String = format!("Application {}", capitalize_first(&humanized));
    let mut message: String = format!("Your application status is now {humanized}");
    if let Some(remarks) = remarks.map(str::trim).filter(|r| !r.is_empty()) {
        message.push_str(". Notes: ");
        message.push_str(remarks);
    }
    NotificationDraft {
        application_id,
        kind: NotificationKind::ApplicationStatus,
        title,
        message,
        related_event_id: None,
    }
}

/// Builds the notification a published calendar event sends to one
/// recipient.
#[must_use]
pub fn calendar_event_notification(
    event: &CalendarEvent,
    application_id: i64,
) -> NotificationDraft {
    NotificationDraft {
        application_id,
        kind: NotificationKind::CalendarEvent,
        title: event.title().to_string(),
        message: calendar_message(event),
        related_event_id: Some(event.event_id()),
    }
}

fn calendar_message(event: &CalendarEvent) -> String {
    let range: String = if event.single_day() {
        format_event_date(event.starts_on())
    } else {
        format!(
            "{} - {}",
            format_event_date(event.starts_on()),
            format_event_date(event.ends_on())
        )
    };
    let mut message: String = format!("Scheduled for {range}");
    if let Some(description) = event.description().map(str::trim).filter(|d| !d.is_empty()) {
        message.push_str(". ");
        message.push_str(description);
    }
    message
}

fn format_event_date(date: Date) -> String {
    date.format(EVENT_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
