//! Property values, tagged with how the serializer has to write them.

use super::{Date, DateTime, UtcOffset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Backslash-escaped on output.
    Text(String),
    /// Multi-valued TEXT such as `CATEGORIES`; each element escaped on its own.
    TextList(Vec<String>),
    Integer(i32),
    Date(Date),
    DateTime(DateTime),
    UtcOffset(UtcOffset),
    /// Written verbatim apart from line breaks: URIs, recurrence rules,
    /// calendar addresses and custom property values.
    Raw(String),
}
