//! Escaping for TEXT values, parameter values and verbatim values.

/// Walks `s`, treating CRLF, CR and LF alike as one line break.
///
/// `emit` receives `None` for a line break and `Some(c)` for anything else.
fn walk_lines(s: &str, out: &mut String, mut emit: impl FnMut(Option<char>, &mut String)) {
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                emit(None, out);
            }
            '\n' => emit(None, out),
            other => emit(Some(other), out),
        }
    }
}

/// Backslash-escapes a TEXT value (RFC 5545 §3.3.11).
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    walk_lines(s, &mut out, |c, out| match c {
        None => out.push_str("\\n"),
        Some(c @ ('\\' | ',' | ';')) => {
            out.push('\\');
            out.push(c);
        }
        Some(c) => out.push(c),
    });
    out
}

/// Escapes every element of a multi-valued TEXT property. The separating
/// commas are left bare.
#[must_use]
pub fn escape_text_list(values: &[String]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_text(value));
    }
    out
}

/// Quotes a parameter value when it contains a delimiter, using RFC 6868
/// caret escapes for the characters a quoted string cannot hold.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let delimited = s.contains([':', ';', ',', '"', '^', '\n', '\r']);
    if !delimited {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    walk_lines(s, &mut out, |c, out| match c {
        None => out.push_str("^n"),
        Some('^') => out.push_str("^^"),
        Some('"') => out.push_str("^'"),
        Some(c) => out.push(c),
    });
    out.push('"');
    out
}

/// Keeps a verbatim value (URI, RECUR, caller-supplied) on one content
/// line by turning its line breaks into `\n`. Nothing else changes.
#[must_use]
pub fn sanitize_raw(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    walk_lines(s, &mut out, |c, out| match c {
        None => out.push_str("\\n"),
        Some(c) => out.push(c),
    });
    out
}
