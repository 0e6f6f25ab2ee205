//! iCalendar document rendering.
//!
//! Renders one VCALENDAR with a single advisory VTIMEZONE block for the
//! document zone and one VEVENT per entry of
//! [`CalendarProperties::dates_list`]. Content lines are joined with CRLF and
//! the document has no trailing line break. Apart from `DTSTAMP`, output is a
//! pure function of the properties and configuration.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use md5::{Digest, Md5};

use crate::dst::DstPolicy;
use crate::error::{IcsError, Result};
use crate::escape::{escape_text, fold_line, CRLF};
use crate::format::TimestampFormat;
use crate::properties::CalendarProperties;
use crate::request_url::{self, RequestContext};
use crate::timestamp::{ParsedInstant, TimestampSet};

/// UTC layout of `DTSTAMP`.
const DTSTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// How each VEVENT's `UID` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UidStrategy {
    /// MD5 of the `uuid` seed followed by the entry's zero-based position.
    /// Coincident events get distinct UIDs; reordering entries changes them.
    #[default]
    SeedIndex,
    /// MD5 of the raw date string. Stable under reordering, but two events at
    /// the identical date-time-zone string share a UID.
    ContentHash,
}

impl UidStrategy {
    fn uid(self, seed: &str, index: usize, raw: &str) -> String {
        let mut hasher = Md5::new();
        match self {
            UidStrategy::SeedIndex => {
                hasher.update(seed.as_bytes());
                hasher.update(index.to_string().as_bytes());
            }
            UidStrategy::ContentHash => hasher.update(raw.as_bytes()),
        }
        format!("{:x}", hasher.finalize())
    }
}

/// A calendar ready to be rendered as ICS text.
///
/// # Example
/// ```
/// use ics_core::{CalendarDocument, CalendarProperties};
///
/// let props = CalendarProperties {
///     timezone: "Europe/Zurich".into(),
///     product_identifier: "my domain".into(),
///     summary: "An exciting event".into(),
///     description: "with a lot more information".into(),
///     dates_list: vec!["1970-01-01 01:00:00 Europe/Zurich".into()],
///     uuid: "123456789".into(),
///     url: None,
/// };
/// let ics = CalendarDocument::new(props).generate().unwrap();
/// assert!(ics.contains("DTSTART;TZID=Europe/Zurich:19700101T010000\r\n"));
/// assert!(ics.ends_with("END:VCALENDAR"));
/// ```
#[derive(Debug, Clone)]
pub struct CalendarDocument {
    properties: CalendarProperties,
    request: Option<RequestContext>,
    format: TimestampFormat,
    dst_policy: DstPolicy,
    uid_strategy: UidStrategy,
}

impl CalendarDocument {
    pub fn new(properties: CalendarProperties) -> Self {
        Self {
            properties,
            request: None,
            format: TimestampFormat::default(),
            dst_policy: DstPolicy::default(),
            uid_strategy: UidStrategy::default(),
        }
    }

    /// Request whose base URL resolves a relative `url` property.
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<TimestampFormat>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    pub fn with_uid_strategy(mut self, strategy: UidStrategy) -> Self {
        self.uid_strategy = strategy;
        self
    }

    pub fn properties(&self) -> &CalendarProperties {
        &self.properties
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.format
    }

    /// Render the document, stamping every event with the current time.
    ///
    /// # Errors
    /// Fails before any parsing with `IcsError::MissingProperty` or
    /// `IcsError::EmptyTimestampList` on an incomplete property bag, and with
    /// `IcsError::InvalidTimezone` if the document zone is unknown. Any entry
    /// of `dates_list` that does not parse fails the whole call with
    /// `IcsError::InvalidTimestampFormat`.
    pub fn generate(&self) -> Result<String> {
        self.generate_at(Utc::now())
    }

    /// Render the document with an explicit `DTSTAMP` instant.
    ///
    /// # Errors
    /// Same as [`CalendarDocument::generate`].
    pub fn generate_at(&self, stamp: DateTime<Utc>) -> Result<String> {
        let props = &self.properties;
        props.validate()?;

        let zone: Tz = props
            .timezone
            .trim()
            .parse()
            .map_err(|_| IcsError::InvalidTimezone(props.timezone.clone()))?;
        let timestamps = TimestampSet::new()
            .with_timestamp_format(self.format.clone())
            .with_default_zone(zone)
            .with_dst_policy(self.dst_policy);

        // Validates every entry up front, so no VEVENT is built for a list
        // that is going to fail.
        let (first, last) = timestamps.min_max(&props.dates_list)?;
        let url = self.event_url()?;

        tracing::debug!(
            timezone = zone.name(),
            events = props.dates_list.len(),
            first = %first,
            last = %last,
            "generating calendar"
        );

        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", escape_text(&props.product_identifier)),
            format!("X-WR-TIMEZONE:{}", zone.name()),
            "X-PUBLISHED-TTL:P1W".to_string(),
        ];
        push_timezone(&mut lines, zone);

        let dtstamp = stamp.format(DTSTAMP_FORMAT).to_string();
        for (index, raw) in props.dates_list.iter().enumerate() {
            let start = timestamps.parse(raw)?;
            let uid = self.uid_strategy.uid(&props.uuid, index, raw);
            tracing::trace!(index, uid = %uid, start = %start, "rendering event");
            self.push_event(&mut lines, &uid, &start, url.as_deref(), &dtstamp);
        }

        lines.push("END:VCALENDAR".to_string());

        let folded: Vec<String> = lines.iter().map(|line| fold_line(line)).collect();
        Ok(folded.join(CRLF))
    }

    fn push_event(
        &self,
        lines: &mut Vec<String>,
        uid: &str,
        start: &ParsedInstant,
        url: Option<&str>,
        dtstamp: &str,
    ) {
        let props = &self.properties;
        let summary = escape_text(&props.summary);
        let description = escape_text(&props.description);

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}", uid));
        lines.push(format!(
            "DTSTART;TZID={}:{}",
            start.tzid(),
            start.to_ics_local()
        ));
        lines.push("SEQUENCE:0".to_string());
        lines.push("TRANSP:OPAQUE".to_string());
        lines.push(format!("SUMMARY:{}", summary));
        lines.push("CLASS:PUBLIC".to_string());
        lines.push(format!("DESCRIPTION:{}", description));
        lines.push(format!("X-ALT-DESC;FMTTYPE=text/html:{}", description));
        if let Some(url) = url {
            lines.push(format!("URL:{}", url));
        }
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push("END:VEVENT".to_string());
    }

    /// The `url` property made absolute, if one is set.
    fn event_url(&self) -> Result<Option<String>> {
        let Some(reference) = self
            .properties
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
        else {
            return Ok(None);
        };

        let base = self
            .request
            .as_ref()
            .map(RequestContext::base_url)
            .transpose()?;
        request_url::resolve(base.as_deref(), reference).map(Some)
    }
}

/// Advisory zone declaration. Clients use their own zone database for the
/// actual offsets, so no STANDARD/DAYLIGHT rules are emitted.
fn push_timezone(lines: &mut Vec<String>, zone: Tz) {
    lines.push("BEGIN:VTIMEZONE".to_string());
    lines.push(format!("TZID:{}", zone.name()));
    lines.push(format!("X-LIC-LOCATION:{}", zone.name()));
    lines.push("END:VTIMEZONE".to_string());
}
