//! iCalendar (RFC 5545) support.
//!
//! - `core`: the calendar document model and value types
//! - `normalize`: parsing of loosely formatted date/time strings
//! - `build`: deterministic serialization to RFC 5545 text

pub mod build;
pub mod core;
pub mod normalize;

#[cfg(test)]
mod tests;
