//! Request → `CalendarDocument` mapping.
//!
//! Pure: no I/O, no encoding. Everything that can be wrong with a request is
//! caught here, so a document that comes out always encodes.

use std::collections::HashSet;

use chrono_tz::Tz;

use icalstash_rfc::error::{MappingError, MappingResult};
use icalstash_rfc::rfc::ical::core::{CalendarDocument, EventRecord};
use icalstash_rfc::rfc::ical::normalize::{align_span, to_event_time, to_instant};

use crate::request::{EventRequest, EventsRequest};

/// ## Summary
/// Maps a request onto a calendar document.
///
/// Empty scalars become absent, blank list entries are dropped and every
/// timestamp is normalized.
///
/// ## Errors
/// Returns the first `MappingError` found: a missing required field, an
/// unparseable timestamp, an unknown time zone, a relative or malformed URL,
/// or a malformed custom property.
pub fn translate(request: &EventsRequest) -> MappingResult<CalendarDocument> {
    let calendar_id = required("calendar_id", &request.calendar_id)?;

    let mut doc = CalendarDocument::new(calendar_id);
    doc.product_id = non_empty(request.prodid.as_ref());
    doc.version = non_empty(request.version.as_ref());
    doc.calendar_scale = non_empty(request.calscale.as_ref());
    doc.method = non_empty(request.method.as_ref());
    doc.name = non_empty(request.name.as_ref());
    doc.description = non_empty(request.description.as_ref());
    doc.time_zone = non_empty(request.timezone.as_ref())
        .map(|tz| resolve_time_zone("timezone", &tz))
        .transpose()?;

    let mut seen_uids = HashSet::new();
    for (index, event) in request.events.iter().enumerate() {
        let record = translate_event(&format!("events[{index}]"), event, doc.time_zone)?;
        if !seen_uids.insert(record.uid.clone()) {
            tracing::warn!(
                calendar_id,
                uid = %record.uid,
                "Duplicate event UID in request"
            );
        }
        doc.events.push(record);
    }

    Ok(doc)
}

fn translate_event(
    prefix: &str,
    event: &EventRequest,
    tz: Option<Tz>,
) -> MappingResult<EventRecord> {
    let field = |name: &str| format!("{prefix}.{name}");

    let uid = required(&field("uid"), &event.uid)?;
    let dt_stamp = to_instant(
        &field("dtstamp"),
        required(&field("dtstamp"), &event.dtstamp)?,
    )?;
    let dt_start = to_event_time(
        &field("dtstart"),
        required(&field("dtstart"), &event.dtstart)?,
        event.is_all_day,
        tz,
    )?;

    let dt_end = non_empty(event.dtend.as_ref())
        .map(|raw| to_event_time(&field("dtend"), &raw, event.is_all_day, tz))
        .transpose()?;
    let (dt_start, dt_end) = match dt_end {
        Some(end) => {
            let (start, end) = align_span(dt_start, end);
            (start, Some(end))
        }
        None => (dt_start, None),
    };

    let mut record = EventRecord::new(uid, dt_stamp, dt_start);
    record.is_all_day = event.is_all_day;
    record.dt_end = dt_end;

    record.summary = non_empty(event.summary.as_ref());
    record.description = non_empty(event.description.as_ref());
    record.location = non_empty(event.location.as_ref());
    record.organizer = non_empty(event.organizer.as_ref());
    record.status = non_empty(event.status.as_ref());
    record.transparency = non_empty(event.transp.as_ref());
    record.sequence = event.sequence;
    record.created = non_empty(event.created.as_ref())
        .map(|raw| to_instant(&field("created"), &raw))
        .transpose()?;
    record.last_modified = non_empty(event.last_modified.as_ref())
        .map(|raw| to_instant(&field("last_modified"), &raw))
        .transpose()?;
    record.class = non_empty(event.class.as_ref());
    record.priority = event.priority;
    record.url = non_empty(event.url.as_ref())
        .map(|raw| absolute_url(&field("url"), raw))
        .transpose()?;
    record.recurrence_rule = non_empty(event.rrule.as_ref());
    record.related_to = non_empty(event.related_to.as_ref());

    record.attendees = non_blank(&event.attendee);
    record.attachments = non_blank(&event.attach);
    record.categories = non_blank(&event.categories);
    record.comments = non_blank(&event.comment);
    record.contacts = non_blank(&event.contact);
    record.exception_dates = non_blank(&event.exdate);
    record.recurrence_dates = non_blank(&event.rdate);
    record.resources = non_blank(&event.resources);
    record.custom_properties = custom_properties(&field("custom_properties"), event)?;

    Ok(record)
}

fn required<'a>(field: &str, value: &'a str) -> MappingResult<&'a str> {
    if value.trim().is_empty() {
        Err(MappingError::MissingField {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .collect()
}

fn resolve_time_zone(field: &str, name: &str) -> MappingResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_e| MappingError::UnknownTimeZone {
            field: field.to_string(),
            value: name.to_string(),
        })
}

fn absolute_url(field: &str, raw: String) -> MappingResult<String> {
    match url::Url::parse(raw.trim()) {
        Ok(_) => Ok(raw),
        Err(_) => Err(MappingError::InvalidUrl {
            field: field.to_string(),
            value: raw,
        }),
    }
}

/// Names a custom property may not take: the component delimiters, and
/// every property the encoder already writes from a dedicated field.
const RESERVED_PROPERTY_NAMES: &[&str] = &[
    "BEGIN",
    "END",
    "UID",
    "DTSTAMP",
    "DTSTART",
    "DTEND",
    "DURATION",
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "STATUS",
    "CLASS",
    "TRANSP",
    "ORGANIZER",
    "PRIORITY",
    "SEQUENCE",
    "URL",
    "CREATED",
    "LAST-MODIFIED",
    "RELATED-TO",
    "RRULE",
    "ATTENDEE",
    "CATEGORIES",
    "COMMENT",
    "CONTACT",
    "ATTACH",
    "EXDATE",
    "RDATE",
    "RESOURCES",
];

/// `iana-token` / `x-name` shape (one or more of ALPHA, DIGIT, `-`) and not
/// reserved, compared case-insensitively.
fn is_property_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !RESERVED_PROPERTY_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

fn custom_properties(
    prefix: &str,
    event: &EventRequest,
) -> MappingResult<Vec<(String, String)>> {
    let mut properties = Vec::with_capacity(event.custom_properties.len());

    for (name, value) in &event.custom_properties {
        let field = format!("{prefix}.{name}");
        if !is_property_name(name) {
            return Err(MappingError::InvalidPropertyName {
                field,
                value: name.clone(),
            });
        }

        let serde_json::Value::String(value) = value else {
            return Err(MappingError::InvalidValue {
                field,
                reason: format!("expected a string, got {value}"),
            });
        };

        if !value.trim().is_empty() {
            properties.push((name.clone(), value.clone()));
        }
    }

    Ok(properties)
}
