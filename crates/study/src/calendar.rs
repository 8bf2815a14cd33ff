//! Call events mapped onto the calendar view.

use crate::StudyError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a scheduled call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallEventStatus {
    /// Upcoming.
    #[default]
    Scheduled,
    /// Took place.
    Completed,
    /// Called off.
    Canceled,
}

impl CallEventStatus {
    /// Calendar color for events with this status.
    pub fn color(self) -> &'static str {
        match self {
            CallEventStatus::Scheduled => "hsl(var(--primary))",
            CallEventStatus::Completed => "hsl(142 76% 36%)",
            CallEventStatus::Canceled => "hsl(var(--muted-foreground))",
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            CallEventStatus::Scheduled => "scheduled",
            CallEventStatus::Completed => "completed",
            CallEventStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for CallEventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallEventStatus {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(CallEventStatus::Scheduled),
            "completed" => Ok(CallEventStatus::Completed),
            "canceled" => Ok(CallEventStatus::Canceled),
            other => Err(StudyError::InvalidCallStatus(other.to_string())),
        }
    }
}

/// The contact fields a call event carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    /// Contact id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Firm, if known.
    pub firm: Option<String>,
}

/// A networking call on the user's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEvent {
    /// Event id.
    pub id: String,
    /// Owner.
    pub user_id: String,
    /// Linked contact id, if any.
    pub contact_id: Option<String>,
    /// User-entered title.
    pub title: String,
    /// Start time.
    pub start_at: DateTime<Utc>,
    /// End time.
    pub end_at: DateTime<Utc>,
    /// Status.
    #[serde(default)]
    pub status: CallEventStatus,
    /// Last modification; completion time for completed calls.
    pub updated_at: DateTime<Utc>,
    /// Joined contact row.
    #[serde(default)]
    pub contact: Option<ContactSummary>,
}

impl CallEvent {
    /// "Name - Firm" when the contact has a firm, the contact name when it doesn't, and the
    /// event title when there is no contact.
    pub fn display_title(&self) -> String {
        match &self.contact {
            Some(ContactSummary {
                name,
                firm: Some(firm),
                ..
            }) if !firm.is_empty() => format!("{name} - {firm}"),
            Some(contact) => contact.name.clone(),
            None => self.title.clone(),
        }
    }

    /// Maps the event onto the calendar widget's shape.
    pub fn to_calendar_event(&self) -> CalendarEvent {
        let color = self.status.color();
        CalendarEvent {
            id: self.id.clone(),
            title: self.display_title(),
            start: self.start_at,
            end: self.end_at,
            background_color: color,
            border_color: color,
            status: self.status,
        }
    }
}

/// A calendar widget event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Call event id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Start time.
    pub start: DateTime<Utc>,
    /// End time.
    pub end: DateTime<Utc>,
    /// Fill color.
    pub background_color: &'static str,
    /// Border color.
    pub border_color: &'static str,
    /// Source status.
    pub status: CallEventStatus,
}

/// Maps call events onto calendar events, preserving order.
pub fn to_calendar_events(events: &[CallEvent]) -> Vec<CalendarEvent> {
    events.iter().map(CallEvent::to_calendar_event).collect()
}
