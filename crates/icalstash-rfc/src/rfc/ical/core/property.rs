//! iCalendar property type (RFC 5545 §3.1, §3.8).

use super::{Date, DateTime, EventTime, Parameter, UtcOffset, Value};

/// A single content line before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name, written exactly as stored.
    pub name: String,
    /// Parameters in output order.
    pub params: Vec<Parameter>,
    pub value: Value,
}

impl Property {
    /// Creates a property without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            value,
        }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Value::Text(value.into()))
    }

    /// Creates a property with a comma-separated text list value.
    #[must_use]
    pub fn text_list(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, Value::TextList(values))
    }

    /// Creates a property with an integer value.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, Value::Integer(value))
    }

    /// Creates a property whose value is written verbatim.
    #[must_use]
    pub fn raw(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Value::Raw(value.into()))
    }

    /// Creates a property with a UTC-OFFSET value.
    #[must_use]
    pub fn utc_offset(name: impl Into<String>, offset: UtcOffset) -> Self {
        Self::new(name, Value::UtcOffset(offset))
    }

    /// Creates a property with a date value, tagged `VALUE=DATE`.
    #[must_use]
    pub fn date(name: impl Into<String>, date: Date) -> Self {
        Self::new(name, Value::Date(date)).with_param(Parameter::value_type("DATE"))
    }

    /// Creates a property with a datetime value.
    ///
    /// Zoned values get a `TZID` parameter; UTC values carry their `Z`
    /// suffix in the value itself.
    #[must_use]
    pub fn date_time(name: impl Into<String>, dt: DateTime) -> Self {
        let prop = Self::new(name, Value::DateTime(dt));
        match dt.tzid() {
            Some(tzid) => prop.with_param(Parameter::tzid(tzid)),
            None => prop,
        }
    }

    /// Creates a DATE or DATE-TIME property from an event time.
    #[must_use]
    pub fn event_time(name: impl Into<String>, time: EventTime) -> Self {
        match time {
            EventTime::Date(date) => Self::date(name, date),
            EventTime::DateTime(dt) => Self::date_time(name, dt),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }
}
