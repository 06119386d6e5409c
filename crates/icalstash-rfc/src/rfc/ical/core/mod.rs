//! iCalendar core models (RFC 5545).
//!
//! Two layers live here:
//! - the calendar document model (`CalendarDocument`, `EventRecord`) that
//!   callers build, flat and immutable once constructed
//! - the content model (`Component`, `Property`, `Parameter`, `Value`) the
//!   encoder lowers a document into before serialization

mod component;
mod datetime;
mod document;
mod parameter;
mod property;
mod value;

pub use component::{Component, ComponentKind};
pub use datetime::{Date, DateTime, DateTimeForm, EventTime, UtcOffset};
pub use document::{CalendarDocument, EventRecord};
pub use parameter::Parameter;
pub use property::Property;
pub use value::Value;
