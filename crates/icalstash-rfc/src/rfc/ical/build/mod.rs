//! iCalendar serialization (RFC 5545).
//!
//! - Escape: TEXT, parameter and verbatim value escaping
//! - Fold: content line folding at 75 octets
//! - Serializer: component/property lowering to text, in insertion order
//! - Encoder: `CalendarDocument` to a complete VCALENDAR
//! - Vtimezone: VTIMEZONE blocks derived from the tz database

mod encoder;
mod escape;
mod fold;
mod serializer;
mod vtimezone;

pub use encoder::encode;
pub use escape::{escape_param_value, escape_text, escape_text_list, sanitize_raw};
pub use fold::fold_line;
pub use serializer::{serialize_component, serialize_property};
pub use vtimezone::build_vtimezone;
