//! Inbound request shape.
//!
//! Field names follow the wire message callers already produce. Every field
//! is optional on the wire; required fields are enforced by the translator
//! so that a missing value surfaces as a `MappingError` naming it.

use serde::{Deserialize, Serialize};

/// A calendar and the events to store in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsRequest {
    pub calendar_id: String,
    pub prodid: Option<String>,
    pub version: Option<String>,
    pub calscale: Option<String>,
    pub method: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// IANA zone identifier, e.g. `Europe/Berlin`.
    pub timezone: Option<String>,
    pub events: Vec<EventRequest>,
}

/// One event. Timestamps are strings in any layout the normalizer accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRequest {
    pub uid: String,
    pub dtstamp: String,
    pub dtstart: String,
    pub dtend: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub attendee: Vec<String>,
    pub status: Option<String>,
    pub transp: Option<String>,
    pub sequence: Option<i32>,
    pub created: Option<String>,
    pub last_modified: Option<String>,
    pub class: Option<String>,
    pub priority: Option<i32>,
    pub url: Option<String>,
    pub rrule: Option<String>,
    pub attach: Vec<String>,
    pub categories: Vec<String>,
    pub comment: Vec<String>,
    pub contact: Vec<String>,
    pub exdate: Vec<String>,
    pub rdate: Vec<String>,
    pub related_to: Option<String>,
    pub resources: Vec<String>,
    /// Extra properties in the order they appear in the request body.
    pub custom_properties: serde_json::Map<String, serde_json::Value>,
    pub is_all_day: bool,
}
