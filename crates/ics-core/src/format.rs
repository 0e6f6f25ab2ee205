//! Timestamp layout strings built from single-letter date tokens.
//!
//! A [`TimestampFormat`] describes the exact textual shape of a timestamp
//! entry, e.g. `"Y-m-d H:i:s T"` for `1970-01-01 01:00:00 Europe/Zurich`.
//!
//! | token | matches |
//! |-------|---------|
//! | `Y` | four-digit year |
//! | `m`, `d` | two-digit month, day |
//! | `H`, `i`, `s` | two-digit hour (24h), minute, second |
//! | `T`, `e` | IANA zone name (`Europe/Zurich`, `UTC`, `CET`) |
//! | `\x` | the literal character `x` |
//!
//! The zone token is looked up in the IANA database only. Names that are
//! also database entries (`CET`, `EST`) work; other abbreviations (`CEST`,
//! `PDT`) and numeric offsets (`+01:00`, `Z`) do not match.
//!
//! Any other non-letter character is a literal. Any other letter makes the
//! format unusable: it can be stored and read back, but nothing parses with it.

use std::fmt;

/// Layout expected by default: ISO-like civil time followed by a zone name.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "Y-m-d H:i:s T";

/// A timestamp layout, stored verbatim as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimestampFormat {
    pattern: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Zone,
    Literal(char),
}

/// Raw numeric fields and zone token pulled out of one input string.
///
/// Values are unchecked beyond their digit count; range validation happens
/// when they are turned into a civil date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fields<'a> {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub zone: Option<&'a str>,
}

impl TimestampFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The layout string exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether entries in this layout carry their own timezone token.
    pub fn has_zone(&self) -> bool {
        self.compile()
            .is_some_and(|segments| segments.contains(&Segment::Zone))
    }

    /// Whether the layout only uses known tokens and names a full date.
    pub fn is_usable(&self) -> bool {
        self.compile().is_some()
    }

    fn compile(&self) -> Option<Vec<Segment>> {
        let mut segments = Vec::with_capacity(self.pattern.len());
        let mut chars = self.pattern.chars();
        while let Some(c) = chars.next() {
            let segment = match c {
                'Y' => Segment::Year,
                'm' => Segment::Month,
                'd' => Segment::Day,
                'H' => Segment::Hour,
                'i' => Segment::Minute,
                's' => Segment::Second,
                'T' | 'e' => Segment::Zone,
                '\\' => Segment::Literal(chars.next()?),
                c if c.is_ascii_alphabetic() => return None,
                c => Segment::Literal(c),
            };
            segments.push(segment);
        }

        let names_date = [Segment::Year, Segment::Month, Segment::Day]
            .iter()
            .all(|required| segments.contains(required));
        names_date.then_some(segments)
    }

    /// Match `input` against the layout. The whole input must be consumed.
    pub(crate) fn match_fields<'a>(&self, input: &'a str) -> Option<Fields<'a>> {
        let segments = self.compile()?;
        let mut fields = Fields {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            zone: None,
        };
        let mut rest = input;

        for segment in segments {
            match segment {
                Segment::Year => fields.year = take_digits(&mut rest, 4)? as i32,
                Segment::Month => fields.month = take_digits(&mut rest, 2)?,
                Segment::Day => fields.day = take_digits(&mut rest, 2)?,
                Segment::Hour => fields.hour = take_digits(&mut rest, 2)?,
                Segment::Minute => fields.minute = take_digits(&mut rest, 2)?,
                Segment::Second => fields.second = take_digits(&mut rest, 2)?,
                Segment::Zone => {
                    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                    if end == 0 {
                        return None;
                    }
                    fields.zone = Some(&rest[..end]);
                    rest = &rest[end..];
                }
                Segment::Literal(expected) => {
                    rest = rest.strip_prefix(expected)?;
                }
            }
        }

        rest.is_empty().then_some(fields)
    }
}

/// Consume exactly `width` ASCII digits from the front of `rest`.
fn take_digits(rest: &mut &str, width: usize) -> Option<u32> {
    let digits = rest.get(..width)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    *rest = &rest[width..];
    digits.parse().ok()
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT)
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl From<&str> for TimestampFormat {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for TimestampFormat {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}
