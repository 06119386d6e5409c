//! Property parameters (RFC 5545 §3.2).

/// A `NAME=value` pair attached to a property, as in
/// `DTSTART;TZID=Europe/Berlin:20250601T090000`.
///
/// `value` is kept raw; the serializer decides whether it needs quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    /// Builds a parameter, upper-casing the name.
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            value: value.into(),
        }
    }

    /// `TZID=<zone>` on zoned date-times.
    #[must_use]
    pub fn tzid(zone: impl Into<String>) -> Self {
        Self::new("TZID", zone)
    }

    /// `VALUE=<type>` when a property deviates from its default value type.
    #[must_use]
    pub fn value_type(kind: impl Into<String>) -> Self {
        Self::new("VALUE", kind)
    }

    /// `CN=<display name>` on calendar-address properties.
    #[must_use]
    pub fn cn(display: impl Into<String>) -> Self {
        Self::new("CN", display)
    }
}
