//! Date/time normalization.
//!
//! Inbound timestamps arrive as strings in a handful of layouts. They are
//! matched against a fixed, ordered list of exact formats first; only when
//! none matches does a lenient fallback run, and anything it accepts is
//! logged so callers can fix their input.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use super::core::{Date, DateTime, DateTimeForm, EventTime};
use crate::error::{MappingError, MappingResult};

/// How a source string expressed its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceZone {
    /// Trailing `Z` or an explicit offset (already converted to UTC).
    Utc,
    /// Date and time with no zone information.
    Local,
    /// Date only; time is midnight.
    DateOnly,
}

/// A parsed timestamp before it is given its iCalendar form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDateTime {
    pub value: NaiveDateTime,
    pub zone: SourceZone,
    /// Whether only the lenient fallback accepted the input.
    pub via_fallback: bool,
}

/// Exact layouts, tried in order.
const EXACT_FORMATS: &[(&str, SourceZone)] = &[
    ("%Y%m%dT%H%M%SZ", SourceZone::Utc),
    ("%Y%m%dT%H%M%S", SourceZone::Local),
    ("%Y%m%d", SourceZone::DateOnly),
    ("%Y-%m-%dT%H:%M:%SZ", SourceZone::Utc),
    ("%Y-%m-%dT%H:%M:%S", SourceZone::Local),
];

const FALLBACK_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// ## Summary
/// Parses a timestamp string, exact layouts first, then the fallback.
///
/// ## Errors
/// Returns `MappingError::InvalidDateTime` naming `field` when no layout matches.
pub fn parse(field: &str, raw: &str) -> MappingResult<ParsedDateTime> {
    if let Some((value, zone)) = parse_exact(raw) {
        return Ok(ParsedDateTime {
            value,
            zone,
            via_fallback: false,
        });
    }

    if let Some((value, zone)) = parse_fallback(raw.trim()) {
        tracing::warn!(
            field,
            value = raw,
            "Date/time accepted only by the lenient fallback parser"
        );
        return Ok(ParsedDateTime {
            value,
            zone,
            via_fallback: true,
        });
    }

    Err(MappingError::InvalidDateTime {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn parse_exact(raw: &str) -> Option<(NaiveDateTime, SourceZone)> {
    EXACT_FORMATS.iter().find_map(|&(format, zone)| {
        let value = match zone {
            SourceZone::DateOnly => NaiveDate::parse_from_str(raw, format)
                .ok()
                .and_then(midnight)?,
            SourceZone::Utc | SourceZone::Local => {
                NaiveDateTime::parse_from_str(raw, format).ok()?
            }
        };
        Some((value, zone))
    })
}

fn parse_fallback(raw: &str) -> Option<(NaiveDateTime, SourceZone)> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some((dt.naive_utc(), SourceZone::Utc));
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc2822(raw) {
        return Some((dt.naive_utc(), SourceZone::Utc));
    }

    FALLBACK_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|value| (value, SourceZone::Local))
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .and_then(midnight)
                .map(|value| (value, SourceZone::DateOnly))
        })
}

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

/// ## Summary
/// Normalizes a timestamp that must be a UTC instant (`DTSTAMP`, `CREATED`,
/// `LAST-MODIFIED`). Values without zone information are taken as UTC.
///
/// ## Errors
/// Returns `MappingError::InvalidDateTime` if `raw` cannot be parsed.
pub fn to_instant(field: &str, raw: &str) -> MappingResult<DateTime> {
    parse(field, raw).map(|parsed| DateTime::utc(parsed.value))
}

/// ## Summary
/// Normalizes an event start or end.
///
/// - all-day: the calendar date only, time of day discarded
/// - timed with `tz`: zoned wall-clock time; UTC sources are converted into `tz`
/// - timed without `tz`: UTC sources stay UTC, everything else is floating
///
/// ## Errors
/// Returns `MappingError::InvalidDateTime` if `raw` cannot be parsed.
pub fn to_event_time(
    field: &str,
    raw: &str,
    is_all_day: bool,
    tz: Option<Tz>,
) -> MappingResult<EventTime> {
    let parsed = parse(field, raw)?;

    if is_all_day {
        return Ok(EventTime::Date(Date(parsed.value.date())));
    }

    let dt = match (parsed.zone, tz) {
        (SourceZone::Utc, Some(tz)) => {
            DateTime::zoned(tz.from_utc_datetime(&parsed.value).naive_local(), tz)
        }
        (SourceZone::Local | SourceZone::DateOnly, Some(tz)) => DateTime::zoned(parsed.value, tz),
        (SourceZone::Utc, None) => DateTime::utc(parsed.value),
        (SourceZone::Local | SourceZone::DateOnly, None) => DateTime::floating(parsed.value),
    };

    Ok(EventTime::DateTime(dt))
}

/// ## Summary
/// Gives an event's start and end the same form.
///
/// The only mismatch `to_event_time` can produce is UTC against floating,
/// when no calendar zone is set. The floating side is then read as UTC, the
/// same assumption `to_instant` makes. Every other pair is returned as is.
#[must_use]
pub fn align_span(start: EventTime, end: EventTime) -> (EventTime, EventTime) {
    match (start, end) {
        (EventTime::DateTime(s), EventTime::DateTime(e)) if s.is_utc() != e.is_utc() => {
            let as_utc = |dt: DateTime| match dt.form {
                DateTimeForm::Floating => DateTime::utc(dt.local),
                DateTimeForm::Utc | DateTimeForm::Zoned { .. } => dt,
            };
            (
                EventTime::DateTime(as_utc(s)),
                EventTime::DateTime(as_utc(e)),
            )
        }
        pair => pair,
    }
}
