//! Calendar request handling.

mod service;
mod translate;

pub use service::{CalendarService, SavedCalendar};
pub use translate::translate;
