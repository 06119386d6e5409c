//! Calendar document model.
//!
//! A `CalendarDocument` is built once per request, handed to the encoder and
//! dropped. Optional text fields are `None` when absent; the mapping layer
//! already turned empty strings into `None` and ran every timestamp through
//! the normalizer.

use chrono_tz::Tz;

use icalstash_core::constants::ICS_EXTENSION;

use super::{DateTime, EventTime};

/// A calendar and its events.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDocument {
    /// Storage key stem. Not an iCalendar property.
    pub calendar_id: String,
    pub product_id: Option<String>,
    pub version: Option<String>,
    pub calendar_scale: Option<String>,
    pub method: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub time_zone: Option<Tz>,
    /// Events in output order.
    pub events: Vec<EventRecord>,
}

impl CalendarDocument {
    /// Creates an empty document for the given calendar id.
    #[must_use]
    pub fn new(calendar_id: impl Into<String>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            product_id: None,
            version: None,
            calendar_scale: None,
            method: None,
            name: None,
            description: None,
            time_zone: None,
            events: Vec::new(),
        }
    }

    /// Returns the object key the encoded document is stored under.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}{ICS_EXTENSION}", self.calendar_id)
    }
}

/// A single VEVENT.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub uid: String,
    /// Always a UTC instant.
    pub dt_stamp: DateTime,
    pub dt_start: EventTime,
    pub dt_end: Option<EventTime>,
    /// When set, `dt_start`/`dt_end` are `EventTime::Date`.
    pub is_all_day: bool,

    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Display name of the organizer, emitted as the `CN` parameter.
    pub organizer: Option<String>,
    pub status: Option<String>,
    pub transparency: Option<String>,
    pub sequence: Option<i32>,
    pub created: Option<DateTime>,
    pub last_modified: Option<DateTime>,
    pub class: Option<String>,
    pub priority: Option<i32>,
    pub url: Option<String>,
    /// Passed through verbatim; never expanded or validated.
    pub recurrence_rule: Option<String>,
    pub related_to: Option<String>,

    pub attendees: Vec<String>,
    pub attachments: Vec<String>,
    pub categories: Vec<String>,
    pub comments: Vec<String>,
    pub contacts: Vec<String>,
    pub exception_dates: Vec<String>,
    pub recurrence_dates: Vec<String>,
    pub resources: Vec<String>,
    /// Extra properties as (name, raw value), in insertion order.
    pub custom_properties: Vec<(String, String)>,
}

impl EventRecord {
    /// Creates an event carrying only the required fields.
    #[must_use]
    pub fn new(uid: impl Into<String>, dt_stamp: DateTime, dt_start: EventTime) -> Self {
        Self {
            uid: uid.into(),
            dt_stamp,
            dt_start,
            dt_end: None,
            is_all_day: matches!(dt_start, EventTime::Date(_)),
            summary: None,
            description: None,
            location: None,
            organizer: None,
            status: None,
            transparency: None,
            sequence: None,
            created: None,
            last_modified: None,
            class: None,
            priority: None,
            url: None,
            recurrence_rule: None,
            related_to: None,
            attendees: Vec::new(),
            attachments: Vec::new(),
            categories: Vec::new(),
            comments: Vec::new(),
            contacts: Vec::new(),
            exception_dates: Vec::new(),
            recurrence_dates: Vec::new(),
            resources: Vec::new(),
            custom_properties: Vec::new(),
        }
    }
}
