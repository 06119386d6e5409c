//! iCalendar serializer (RFC 5545).
//!
//! Writes the content model out as folded, CRLF-terminated text. Properties
//! and children are written in the order they were added; ordering is the
//! encoder's job.

use super::escape::{escape_param_value, escape_text, escape_text_list, sanitize_raw};
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, Parameter, Property, Value};

/// Serializes a component, its properties and its children to a string.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut result = String::new();
    write_component(&mut result, component);
    result
}

fn write_component(out: &mut String, component: &Component) {
    out.push_str(&fold_line(&format!("BEGIN:{}", component.kind)));

    for prop in &component.properties {
        out.push_str(&serialize_property(prop));
    }

    for child in &component.children {
        write_component(out, child);
    }

    out.push_str(&fold_line(&format!("END:{}", component.kind)));
}

/// Serializes a property to one folded content line, CRLF included.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    for param in &prop.params {
        line.push(';');
        line.push_str(&serialize_parameter(param));
    }

    line.push(':');
    line.push_str(&serialize_value(&prop.value));

    fold_line(&line)
}

fn serialize_parameter(param: &Parameter) -> String {
    format!("{}={}", param.name, escape_param_value(&param.value))
}

fn serialize_value(value: &Value) -> String {
    match value {
        Value::Text(s) => escape_text(s),
        Value::TextList(list) => escape_text_list(list),
        Value::Integer(i) => i.to_string(),
        Value::Date(d) => d.to_string(),
        Value::DateTime(dt) => dt.to_string(),
        Value::UtcOffset(offset) => offset.to_string(),
        Value::Raw(s) => sanitize_raw(s),
    }
}
