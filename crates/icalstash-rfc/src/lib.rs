//! RFC 5545 calendar model, date/time normalization and iCalendar encoding.

pub mod error;
pub mod rfc;
