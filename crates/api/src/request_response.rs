// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use time::Date;

/// API request to submit an application for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitApplicationRequest {
    /// The application to submit.
    pub application_id: i64,
}

/// API response for a submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitApplicationResponse {
    /// The application id.
    pub application_id: i64,
    /// The resulting status label.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to decide an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecideApplicationRequest {
    /// The application to decide.
    pub application_id: i64,
    /// The decision label: APPROVED or REJECTED.
    pub decision: String,
    /// Remarks to capture with the decision.
    pub remarks: Option<String>,
}

/// API response for a decision.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecideApplicationResponse {
    /// The application id.
    pub application_id: i64,
    /// The resulting status label.
    pub status: String,
    /// The account identifier, when one is assigned.
    pub account_identifier: Option<String>,
    /// A success message.
    pub message: String,
}

/// API request to deactivate an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeactivateApplicationRequest {
    /// The application to deactivate.
    pub application_id: i64,
}

/// API response for a deactivation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeactivateApplicationResponse {
    /// The application id.
    pub application_id: i64,
    /// The resulting status label.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to publish a calendar event to active applicants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCalendarEventRequest {
    /// The event id assigned by the calendar collaborator.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// The first day of the event.
    pub starts_on: Date,
    /// The last day of the event, inclusive. Missing means single-day.
    pub ends_on: Option<Date>,
    /// An optional description.
    pub description: Option<String>,
}

/// API response for a published calendar event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishCalendarEventResponse {
    /// The event id.
    pub event_id: i64,
    /// How many applicants were notified.
    pub recipients: usize,
    /// A success message.
    pub message: String,
}

/// One decision history entry, for listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntryView {
    /// The entry id.
    pub entry_id: i64,
    /// The recorded decision label.
    pub status: String,
    /// Remarks captured with the decision.
    pub remarks: Option<String>,
    /// Display name of the deciding administrator.
    pub decided_by: String,
    /// Server-assigned timestamp.
    pub recorded_at: String,
}

/// API response for a history listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListHistoryResponse {
    /// The application id.
    pub application_id: i64,
    /// The entries, oldest first.
    pub entries: Vec<HistoryEntryView>,
}

/// One notification, for listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationView {
    /// The notification id.
    pub notification_id: i64,
    /// The kind label.
    pub kind: String,
    /// The title.
    pub title: String,
    /// The message body.
    pub message: String,
    /// Whether the recipient has read it.
    pub read: bool,
    /// The calendar event this refers to, if any.
    pub related_event_id: Option<i64>,
    /// Server-assigned timestamp.
    pub created_at: String,
}

/// API response for a notification listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListNotificationsResponse {
    /// The application id.
    pub application_id: i64,
    /// The notifications, newest first.
    pub notifications: Vec<NotificationView>,
}

/// API response for an unread-notification count.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnreadCountResponse {
    /// The application id.
    pub application_id: i64,
    /// The unread count.
    pub count: i64,
}
