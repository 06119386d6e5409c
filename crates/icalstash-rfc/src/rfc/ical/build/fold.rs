//! Content line folding for iCalendar (RFC 5545 §3.1).

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to comply with the 75-octet limit and terminates
/// it with CRLF.
///
/// Continuation lines start with a single space, which counts toward their
/// 75 octets. Splits only ever happen on UTF-8 character boundaries.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}\r\n");
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS + 1) * 3);
    let mut rest = line;
    let mut budget = MAX_LINE_OCTETS;

    loop {
        if rest.len() <= budget {
            result.push_str(rest);
            result.push_str("\r\n");
            return result;
        }

        let mut end = budget;
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        // A budget smaller than one character cannot happen with a 74-octet
        // budget and 4-octet UTF-8, but never emit an empty segment.
        if end == 0 {
            end = rest
                .char_indices()
                .nth(1)
                .map_or(rest.len(), |(idx, _)| idx);
        }

        let (head, tail) = rest.split_at(end);
        result.push_str(head);
        result.push_str("\r\n ");
        rest = tail;
        budget = MAX_LINE_OCTETS - 1;
    }
}
