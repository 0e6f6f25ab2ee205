//! Content-line encoding for iCalendar output (RFC 5545 §3.1, §3.3.11).

/// Maximum content line length in octets, excluding the line break.
pub const MAX_LINE_OCTETS: usize = 75;

/// Line break between content lines.
pub const CRLF: &str = "\r\n";

/// Escape a TEXT property value.
///
/// Backslash, semicolon and comma are backslash-escaped, line feeds become a
/// literal `\n`, and carriage returns are dropped.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Fold a content line so that no physical line exceeds [`MAX_LINE_OCTETS`].
///
/// Continuation lines start with a single space, which counts toward their
/// length. Multi-byte characters are never split. The result carries no
/// trailing line break.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS) * 3);
    let mut used = 0;

    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > MAX_LINE_OCTETS {
            out.push_str(CRLF);
            out.push(' ');
            used = 1;
        }
        out.push(c);
        used += width;
    }

    out
}
