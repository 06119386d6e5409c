//! Temporal values: DATE (§3.3.4), DATE-TIME (§3.3.5) and UTC-OFFSET (§3.3.14).

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// Signed distance from UTC, written `±HHMM` or `±HHMMSS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    /// East of Greenwich is positive.
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let total = self.seconds.unsigned_abs();
        let (hh, mm, ss) = (total / 3600, total / 60 % 60, total % 60);
        write!(f, "{sign}{hh:02}{mm:02}")?;
        // Historical local mean time offsets are not whole minutes.
        if ss > 0 {
            write!(f, "{ss:02}")?;
        }
        Ok(())
    }
}

/// How the wall-clock reading of a [`DateTime`] is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Not anchored at all; `20250601T090000` is 09:00 wherever the reader is.
    Floating,
    /// The reading is already UTC and gets a trailing `Z`.
    Utc,
    /// The reading is local to `tz` and the property carries `TZID=`.
    Zoned { tz: Tz },
}

/// A DATE-TIME: a wall-clock reading plus its anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub local: NaiveDateTime,
    pub form: DateTimeForm,
}

impl DateTime {
    #[must_use]
    pub const fn utc(local: NaiveDateTime) -> Self {
        Self::anchored(local, DateTimeForm::Utc)
    }

    #[must_use]
    pub const fn floating(local: NaiveDateTime) -> Self {
        Self::anchored(local, DateTimeForm::Floating)
    }

    #[must_use]
    pub const fn zoned(local: NaiveDateTime, tz: Tz) -> Self {
        Self::anchored(local, DateTimeForm::Zoned { tz })
    }

    const fn anchored(local: NaiveDateTime, form: DateTimeForm) -> Self {
        Self { local, form }
    }

    /// Zone name for the `TZID` parameter; `None` unless zoned.
    #[must_use]
    pub fn tzid(&self) -> Option<&'static str> {
        if let DateTimeForm::Zoned { tz } = self.form {
            Some(tz.name())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.is_utc() { "Z" } else { "" };
        write!(f, "{}{suffix}", self.local.format("%Y%m%dT%H%M%S"))
    }
}

/// A calendar day with no time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub NaiveDate);

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

/// Start or end of an event: a DATE for all-day events, a DATE-TIME otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTime {
    Date(Date),
    DateTime(DateTime),
}

impl EventTime {
    /// Calendar year of the value as written (wall clock, not UTC).
    #[must_use]
    pub fn year(&self) -> i32 {
        match self {
            Self::Date(d) => d.0.year(),
            Self::DateTime(dt) => dt.local.year(),
        }
    }

    /// Returns the DATE-TIME if this is a timed value.
    #[must_use]
    pub const fn as_date_time(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            Self::Date(_) => None,
        }
    }
}
