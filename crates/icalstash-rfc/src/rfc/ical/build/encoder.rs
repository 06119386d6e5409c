//! Lowers a `CalendarDocument` into the content model and serializes it.

use chrono_tz::Tz;

use icalstash_core::constants::{DEFAULT_ICAL_VERSION, DEFAULT_PRODID};

use super::serializer::serialize_component;
use super::vtimezone::build_vtimezone;
use crate::error::{EncodingError, EncodingResult};
use crate::rfc::ical::core::{
    CalendarDocument, Component, ComponentKind, DateTimeForm, EventRecord, EventTime, Parameter,
    Property,
};

/// Year used for the VTIMEZONE block of a document without events.
const EMPTY_CALENDAR_TZ_YEAR: i32 = 1970;

/// ## Summary
/// Encodes a calendar document as RFC 5545 text.
///
/// Output is CRLF-terminated, folded at 75 octets and fully determined by
/// the document.
///
/// ## Errors
/// Returns `EncodingError::InvariantViolation` if the document could not
/// have come out of the mapping layer: an empty UID, a date-time on an
/// all-day event, a `TZID` the calendar does not define, or a DTEND whose
/// form differs from DTSTART.
#[tracing::instrument(skip_all, fields(calendar_id = %doc.calendar_id, events = doc.events.len()))]
pub fn encode(doc: &CalendarDocument) -> EncodingResult<String> {
    let calendar = build_calendar(doc)?;
    let text = serialize_component(&calendar);

    tracing::debug!(octets = text.len(), "Encoded calendar");

    Ok(text)
}

fn build_calendar(doc: &CalendarDocument) -> EncodingResult<Component> {
    let mut cal = Component::new(ComponentKind::Calendar);

    cal.add_property(Property::text(
        "VERSION",
        doc.version.as_deref().unwrap_or(DEFAULT_ICAL_VERSION),
    ));
    cal.add_property(Property::text(
        "PRODID",
        doc.product_id.as_deref().unwrap_or(DEFAULT_PRODID),
    ));
    cal.add_optional(doc.calendar_scale.as_ref().map(|v| Property::text("CALSCALE", v)));
    cal.add_optional(doc.method.as_ref().map(|v| Property::text("METHOD", v)));
    cal.add_optional(doc.name.as_ref().map(|v| Property::text("X-WR-CALNAME", v)));
    cal.add_optional(doc.description.as_ref().map(|v| Property::text("X-WR-CALDESC", v)));

    if let Some(tz) = doc.time_zone {
        cal.add_property(Property::text("X-WR-TIMEZONE", tz.name()));
        cal.add_child(build_vtimezone(tz, year_span(&doc.events)));
    }

    for event in &doc.events {
        check_event(event, doc.time_zone)?;
        cal.add_child(build_event(event));
    }

    Ok(cal)
}

/// Years covered by the events' starts and ends.
fn year_span(events: &[EventRecord]) -> std::ops::RangeInclusive<i32> {
    let years: Vec<i32> = events
        .iter()
        .flat_map(|e| std::iter::once(e.dt_start).chain(e.dt_end))
        .map(|t| t.year())
        .collect();

    match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => min..=max,
        _ => EMPTY_CALENDAR_TZ_YEAR..=EMPTY_CALENDAR_TZ_YEAR,
    }
}

fn check_event(event: &EventRecord, calendar_tz: Option<Tz>) -> EncodingResult<()> {
    if event.uid.is_empty() {
        return Err(EncodingError::InvariantViolation(
            "event has an empty UID".to_string(),
        ));
    }

    for time in std::iter::once(&event.dt_start).chain(event.dt_end.as_ref()) {
        match time {
            EventTime::DateTime(_) if event.is_all_day => {
                return Err(EncodingError::InvariantViolation(format!(
                    "all-day event {} carries a date-time",
                    event.uid
                )));
            }
            EventTime::DateTime(dt) => {
                if let DateTimeForm::Zoned { tz } = dt.form
                    && Some(tz) != calendar_tz
                {
                    return Err(EncodingError::InvariantViolation(format!(
                        "event {} references TZID {} without a matching VTIMEZONE",
                        event.uid,
                        tz.name()
                    )));
                }
            }
            EventTime::Date(_) => {}
        }
    }

    if let Some(end) = &event.dt_end
        && !same_form(&event.dt_start, end)
    {
        return Err(EncodingError::InvariantViolation(format!(
            "event {} has DTSTART and DTEND of different forms",
            event.uid
        )));
    }

    if !event.dt_stamp.is_utc() {
        return Err(EncodingError::InvariantViolation(format!(
            "event {} has a non-UTC DTSTAMP",
            event.uid
        )));
    }

    Ok(())
}

/// DTEND is a DATE, UTC, zoned or floating exactly when DTSTART is.
fn same_form(start: &EventTime, end: &EventTime) -> bool {
    match (start, end) {
        (EventTime::Date(_), EventTime::Date(_)) => true,
        (EventTime::DateTime(s), EventTime::DateTime(e)) => s.form == e.form,
        _ => false,
    }
}

fn build_event(event: &EventRecord) -> Component {
    let mut ev = Component::new(ComponentKind::Event);

    ev.add_property(Property::text("UID", &event.uid));
    ev.add_property(Property::date_time("DTSTAMP", event.dt_stamp));
    ev.add_property(Property::event_time("DTSTART", event.dt_start));
    ev.add_optional(event.dt_end.map(|t| Property::event_time("DTEND", t)));

    ev.add_optional(event.summary.as_ref().map(|v| Property::text("SUMMARY", v)));
    ev.add_optional(event.description.as_ref().map(|v| Property::text("DESCRIPTION", v)));
    ev.add_optional(event.location.as_ref().map(|v| Property::text("LOCATION", v)));
    ev.add_optional(event.status.as_ref().map(|v| Property::text("STATUS", v)));
    ev.add_optional(event.class.as_ref().map(|v| Property::text("CLASS", v)));
    ev.add_optional(event.transparency.as_ref().map(|v| Property::text("TRANSP", v)));
    ev.add_optional(event.organizer.as_deref().map(|v| cal_address("ORGANIZER", v)));
    ev.add_optional(event.priority.map(|v| Property::integer("PRIORITY", v)));
    ev.add_optional(event.sequence.map(|v| Property::integer("SEQUENCE", v)));
    ev.add_optional(event.url.as_ref().map(|v| Property::raw("URL", v)));
    ev.add_optional(event.created.map(|v| Property::date_time("CREATED", v)));
    ev.add_optional(event.last_modified.map(|v| Property::date_time("LAST-MODIFIED", v)));
    ev.add_optional(event.related_to.as_ref().map(|v| Property::text("RELATED-TO", v)));
    ev.add_optional(event.recurrence_rule.as_ref().map(|v| Property::raw("RRULE", v)));

    for attendee in &event.attendees {
        ev.add_property(cal_address("ATTENDEE", attendee));
    }

    if !event.categories.is_empty() {
        ev.add_property(Property::text_list("CATEGORIES", event.categories.clone()));
    }

    for comment in &event.comments {
        ev.add_property(Property::text("COMMENT", comment));
    }
    for contact in &event.contacts {
        ev.add_property(Property::text("CONTACT", contact));
    }
    for attachment in &event.attachments {
        ev.add_property(Property::raw("ATTACH", attachment));
    }
    for exdate in &event.exception_dates {
        ev.add_property(Property::raw("EXDATE", exdate));
    }
    for rdate in &event.recurrence_dates {
        ev.add_property(Property::raw("RDATE", rdate));
    }

    if !event.resources.is_empty() {
        ev.add_property(Property::text_list("RESOURCES", event.resources.clone()));
    }

    for (name, value) in &event.custom_properties {
        ev.add_property(Property::raw(name, value));
    }

    ev
}

/// ORGANIZER and ATTENDEE name a person, not an address: `who` goes into
/// `CN` exactly as given and the value stays empty.
fn cal_address(name: &str, who: &str) -> Property {
    Property::raw(name, "").with_param(Parameter::cn(who))
}
